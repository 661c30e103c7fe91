//! Completion backend port
//!
//! Defines the interface for sending one translated request to the
//! downstream completion service.

use async_trait::async_trait;
use relay_domain::{BackendFailure, ChatCompletion, TranslatedRequest};

/// Gateway to an OpenAI-compatible completion service.
///
/// Implementations perform exactly one call per invocation and never
/// retry. A non-2xx answer is returned as a [`BackendFailure`] carrying
/// the status and the body verbatim; interpretation happens later, in the
/// classifier. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send `request` and wait for the completed response.
    ///
    /// Dropping the returned future must abort the in-flight call.
    async fn complete(&self, request: &TranslatedRequest) -> Result<ChatCompletion, BackendFailure>;
}
