//! Verbatim record of a failed backend call.

use serde::Serialize;
use std::time::Duration;

/// Status reported for a call that never produced an HTTP response in time.
pub const TIMEOUT_STATUS: u16 = 504;

/// Status reported for connection-level failures and unreadable bodies.
pub const TRANSPORT_STATUS: u16 = 502;

/// Where in the call the failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The backend answered with a non-2xx status.
    Status,
    /// No answer within the caller-supplied timeout.
    Timeout,
    /// Connection, TLS, or body decoding failure.
    Transport,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Status => "status",
            FailureKind::Timeout => "timeout",
            FailureKind::Transport => "transport",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed backend call, captured without interpretation.
///
/// Immutable once built: the invoker records what it saw and the
/// classifier reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFailure {
    kind: FailureKind,
    status_code: u16,
    raw_message: String,
}

impl BackendFailure {
    /// A non-2xx response; `raw_message` is the body exactly as received.
    pub fn from_status(status_code: u16, raw_message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Status,
            status_code,
            raw_message: raw_message.into(),
        }
    }

    pub fn timeout(after: Duration) -> Self {
        Self {
            kind: FailureKind::Timeout,
            status_code: TIMEOUT_STATUS,
            raw_message: format!("backend did not respond within {}ms", after.as_millis()),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transport,
            status_code: TRANSPORT_STATUS,
            raw_message: message.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn raw_message(&self) -> &str {
        &self.raw_message
    }
}

impl std::fmt::Display for BackendFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} failure (status {}): {}",
            self.kind, self.status_code, self.raw_message
        )
    }
}
