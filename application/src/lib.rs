//! Application layer for tool-relay
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::{PROBE_MAX_TOKENS, RelayParams};
pub use ports::{
    completion_backend::CompletionBackend,
    relay_logger::{NoRelayLogger, RelayEvent, RelayLogger},
    web_search::{SearchError, WebSearchPort},
};
pub use use_cases::count_tokens::{TokenCount, count_tokens};
pub use use_cases::intercept_web_search::WebSearchInterceptor;
pub use use_cases::probe_backend::{ProbeBackendUseCase, ProbeFailure, ProbeReport};
pub use use_cases::relay_message::{RelayError, RelayMessageUseCase, RelayOutcome};
