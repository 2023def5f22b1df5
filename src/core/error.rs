use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The operation is not allowed for the ticket's current status
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::InvalidState(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                ErrorResponse::with_error("Database error occurred", e.to_string())
            }
            AppError::Storage(ref msg) => {
                tracing::error!("Storage error: {}", msg);
                ErrorResponse::with_error("Storage error occurred", msg.clone())
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse::with_error("Internal server error", msg.clone())
            }
            AppError::Validation(ref msg) => ErrorResponse::validation(msg.clone()),
            AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::InvalidState(msg) => {
                ErrorResponse::message(msg)
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_conflicts_are_bad_requests() {
        assert_eq!(
            AppError::InvalidState("Only pending tickets can be approved.".to_string())
                .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Validation("User ID must be exactly 12 numbers.".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_status_codes_for_lookup_and_failures() {
        assert_eq!(
            AppError::NotFound("Ticket not found.".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Storage("disk full".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_response_carries_underlying_message() {
        let response = AppError::Storage("bucket unreachable".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, "Storage error occurred");
        assert_eq!(body.error.as_deref(), Some("bucket unreachable"));
        assert!(body.errors.is_none());
    }
}
