//! Presentation layer for tool-relay
//!
//! This crate contains the HTTP surface (axum router, handlers, client
//! authentication and the error envelope) and the CLI definitions.

pub mod cli;
pub mod http;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use http::{ApiError, AppState, ServiceInfo, router};
