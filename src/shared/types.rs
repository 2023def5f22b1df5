use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain `{ "message": ... }` body used by mutation endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body: `message` always, `error` for server-side failures,
/// `errors` for validation failures
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
            errors: None,
        }
    }

    pub fn with_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: Some(error.into()),
            errors: None,
        }
    }

    pub fn validation(message: String) -> Self {
        Self {
            errors: Some(message.split("; ").map(str::to_string).collect()),
            message,
            error: None,
        }
    }
}
