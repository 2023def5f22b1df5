use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::core::error::AppError;

/// Ticket identifier from the `{id}` path segment.
///
/// Anything that is not a UUID cannot name a ticket, so it is reported as
/// not found rather than as a malformed request.
#[derive(Debug, Clone, Copy)]
pub struct TicketId(pub Uuid);

impl<S> FromRequestParts<S> for TicketId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("Ticket not found.".to_string()))?;

        Uuid::parse_str(raw.trim())
            .map(TicketId)
            .map_err(|_| AppError::NotFound("Ticket not found.".to_string()))
    }
}
