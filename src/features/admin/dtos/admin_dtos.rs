use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for a successful approval
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApproveTicketResponseDto {
    pub message: String,
    /// Newly assigned sequential ticket number
    #[schema(example = "1")]
    pub ticket_number: String,
}
