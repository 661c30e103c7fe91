//! Infrastructure layer for tool-relay
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod backend;
pub mod config;
pub mod logging;
#[cfg(feature = "web-search")]
pub mod search;

// Re-export commonly used types
pub use backend::{OpenAiBackend, OpenAiBackendConfig};
pub use config::{ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use logging::JsonlRelayLogger;
#[cfg(feature = "web-search")]
pub use search::ExaSearchAdapter;
