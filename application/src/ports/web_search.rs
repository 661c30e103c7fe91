//! Web search port
//!
//! Used to fill in `WebSearch` tool results that the client could not
//! execute itself.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search service not configured: {0}")]
    NotConfigured(String),

    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Search service returned status {status}")]
    Status { status: u16, body: String },
}

#[async_trait]
pub trait WebSearchPort: Send + Sync {
    /// Run a search for a `WebSearch` tool input
    /// (`query`, optional `allowed_domains` / `blocked_domains`).
    ///
    /// Returns the search service's JSON response.
    async fn search(&self, input: &Value) -> Result<Value, SearchError>;
}
