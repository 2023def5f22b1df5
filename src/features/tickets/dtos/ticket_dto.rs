use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::tickets::models::{Ticket, TicketStatus};
use crate::shared::validation::USER_ID_REGEX;

/// Response DTO for ticket
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponseDto {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub user_id: String,
    pub whatsapp_number: String,
    /// Relative path (`uploads/...`) or absolute URL of the payment slip
    pub payment_slip: String,
    pub status: TicketStatus,
    /// Sequential number, present only for confirmed tickets
    pub ticket_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Ticket> for TicketResponseDto {
    fn from(t: Ticket) -> Self {
        Self {
            id: t.id,
            name: t.name,
            user_id: t.user_id,
            whatsapp_number: t.whatsapp_number,
            payment_slip: t.payment_slip,
            status: t.status,
            ticket_number: t.ticket_number.map(|n| n.to_string()),
            created_at: t.created_at,
        }
    }
}

/// Validated text fields of a submission
#[derive(Debug, Clone, Validate)]
pub struct SubmitTicketDto {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,

    #[validate(regex(path = *USER_ID_REGEX, message = "User ID must be exactly 12 numbers."))]
    pub user_id: String,

    #[validate(length(min = 1, message = "WhatsApp number is required."))]
    pub whatsapp_number: String,
}

impl SubmitTicketDto {
    /// Build from raw form values, trimming surrounding whitespace
    pub fn new(name: &str, user_id: &str, whatsapp_number: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            user_id: user_id.trim().to_string(),
            whatsapp_number: whatsapp_number.trim().to_string(),
        }
    }
}

/// Submission form for OpenAPI documentation
/// Note: the handler reads axum's Multipart extractor directly.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct SubmitTicketForm {
    #[schema(example = "Alice")]
    pub name: String,
    /// Exactly 12 digits
    #[schema(example = "123456789012")]
    pub user_id: String,
    #[schema(example = "+15550100")]
    pub whatsapp_number: String,
    /// Payment slip image or PDF
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub payment_slip: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTicketResponseDto {
    pub message: String,
    pub ticket_id: Uuid,
}
