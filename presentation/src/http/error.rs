//! Client-facing error envelope.
//!
//! Every error leaves the relay as
//! `{"type": "error", "error": {"type": ..., "message": ...}}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_application::RelayError;
use relay_domain::friendly_message;
use serde_json::json;
use tracing::warn;

pub const INVALID_REQUEST_ERROR: &str = "invalid_request_error";
pub const AUTHENTICATION_ERROR: &str = "authentication_error";
pub const API_ERROR: &str = "api_error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The body could not be read as a Messages request.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid API key. Please provide a valid API key.")]
    Unauthorized,

    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl ApiError {
    /// HTTP status, Anthropic error type and message.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::InvalidBody(_) => (
                StatusCode::BAD_REQUEST,
                INVALID_REQUEST_ERROR,
                self.to_string(),
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                AUTHENTICATION_ERROR,
                self.to_string(),
            ),
            ApiError::Relay(RelayError::Request(e)) => {
                (StatusCode::BAD_REQUEST, INVALID_REQUEST_ERROR, e.to_string())
            }
            ApiError::Relay(RelayError::InvalidCompletion(message)) => {
                (StatusCode::BAD_GATEWAY, API_ERROR, message.clone())
            }
            ApiError::Relay(RelayError::Backend {
                status_code,
                message,
                ..
            }) => {
                let status = StatusCode::from_u16(*status_code)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                (status, API_ERROR, friendly_message(message))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = self.parts();
        if status.is_server_error() {
            warn!(status = status.as_u16(), error_type, "Request failed: {}", message);
        }

        let body = Json(json!({
            "type": "error",
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
