//! Invoke step: one backend call under the caller's timeout.

use crate::ports::completion_backend::CompletionBackend;
use crate::ports::relay_logger::{BACKEND_RESPONSE, RelayEvent, RelayLogger};
use relay_domain::{BackendFailure, ChatCompletion, TranslatedRequest};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Sends a [`TranslatedRequest`] downstream exactly once.
///
/// No retries happen here. On timeout the backend future is dropped, which
/// aborts the in-flight HTTP call and releases its connection.
#[derive(Clone)]
pub struct BackendInvoker {
    backend: Arc<dyn CompletionBackend>,
    timeout: Duration,
}

impl BackendInvoker {
    pub fn new(backend: Arc<dyn CompletionBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn invoke(
        &self,
        request: &TranslatedRequest,
        logger: &dyn RelayLogger,
        request_id: &str,
    ) -> Result<ChatCompletion, BackendFailure> {
        let result = match tokio::time::timeout(self.timeout, self.backend.complete(request)).await
        {
            Ok(result) => result,
            Err(_) => Err(BackendFailure::timeout(self.timeout)),
        };

        match &result {
            Ok(completion) => {
                let usage = completion.usage.unwrap_or_default();
                debug!(
                    request_id,
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    "Backend call succeeded"
                );
                logger.log(RelayEvent::for_request(
                    BACKEND_RESPONSE,
                    request_id,
                    json!({
                        "success": true,
                        "usage": usage,
                    }),
                ));
            }
            Err(failure) => {
                warn!(
                    request_id,
                    kind = %failure.kind(),
                    status = failure.status_code(),
                    "Backend call failed"
                );
                logger.log(RelayEvent::for_request(
                    BACKEND_RESPONSE,
                    request_id,
                    json!({
                        "success": false,
                        "kind": failure.kind(),
                        "status_code": failure.status_code(),
                    }),
                ));
            }
        }

        result
    }
}
