//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while translating requests and responses.
///
/// `MalformedRequest` and `Unsupported` describe an inbound request the
/// proxy cannot forward as received; they are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Unsupported request: {0}")]
    Unsupported(String),

    #[error("Invalid backend completion: {0}")]
    InvalidCompletion(String),
}

impl DomainError {
    pub fn malformed(message: impl Into<String>) -> Self {
        DomainError::MalformedRequest(message.into())
    }

    /// Check if this error was caused by missing or invalid request fields
    pub fn is_malformed(&self) -> bool {
        matches!(self, DomainError::MalformedRequest(_))
    }
}
