//! Probe Backend use case: a minimal round trip to check connectivity.

use crate::config::{PROBE_MAX_TOKENS, RelayParams};
use crate::ports::completion_backend::CompletionBackend;
use crate::ports::relay_logger::NoRelayLogger;
use crate::use_cases::relay_message::BackendInvoker;
use relay_domain::{BackendFailure, TranslatedRequest, friendly_message};
use std::sync::Arc;
use tracing::{info, warn};

/// Successful probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub model: String,
    pub response_id: String,
}

/// Failed probe with a human-readable hint.
#[derive(Debug, Clone)]
pub struct ProbeFailure {
    pub failure: BackendFailure,
    pub hint: String,
}

/// Sends a tiny request to the `small_model` under the relay timeout.
#[derive(Clone)]
pub struct ProbeBackendUseCase {
    invoker: BackendInvoker,
    model: String,
}

impl ProbeBackendUseCase {
    pub fn new(backend: Arc<dyn CompletionBackend>, params: &RelayParams) -> Self {
        Self {
            invoker: BackendInvoker::new(backend, params.request_timeout),
            model: params.models.small_model.clone(),
        }
    }

    pub async fn execute(&self) -> Result<ProbeReport, ProbeFailure> {
        let request = TranslatedRequest::probe(&self.model, PROBE_MAX_TOKENS);
        match self.invoker.invoke(&request, &NoRelayLogger, "probe").await {
            Ok(completion) => {
                info!(model = %self.model, id = %completion.id, "Backend probe succeeded");
                Ok(ProbeReport {
                    model: self.model.clone(),
                    response_id: completion.id,
                })
            }
            Err(failure) => {
                warn!(model = %self.model, error = %failure, "Backend probe failed");
                let hint = friendly_message(failure.raw_message());
                Err(ProbeFailure { failure, hint })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedBackend;
    use relay_domain::{ChatCompletion, FinishReason, Usage};

    #[tokio::test]
    async fn test_probe_uses_small_model() {
        let completion = ChatCompletion::single_text(
            "chatcmpl-probe",
            0,
            "gpt-4o-mini",
            "Hi",
            FinishReason::Length,
            Usage::new(1, 5),
        );
        let backend = Arc::new(ScriptedBackend::new(vec![Ok(completion)]));
        let uc = ProbeBackendUseCase::new(backend.clone(), &RelayParams::default());

        let report = uc.execute().await.unwrap();

        assert_eq!(report.response_id, "chatcmpl-probe");
        let sent = backend.last_request().unwrap();
        assert_eq!(sent.model, "gpt-4o-mini");
        assert_eq!(sent.max_tokens, PROBE_MAX_TOKENS);
        assert!(sent.tool_set.is_empty());
    }

    #[tokio::test]
    async fn test_probe_failure_carries_hint() {
        let backend = Arc::new(ScriptedBackend::new(vec![Err(BackendFailure::from_status(
            401,
            "Incorrect API key provided",
        ))]));
        let uc = ProbeBackendUseCase::new(backend, &RelayParams::default());

        let failure = uc.execute().await.unwrap_err();

        assert_eq!(failure.failure.status_code(), 401);
        assert!(!failure.hint.is_empty());
    }
}
