//! Relay Message use case.
//!
//! Forwards one client request to the completion backend and turns the
//! backend's answer into the client's response shape:
//!
//! 1. optional WebSearch result interception ([`WebSearchInterceptor`])
//! 2. normalize: client request → [`TranslatedRequest`] with its [`ToolSet`]
//! 3. invoke: one backend call under the configured timeout
//! 4. on failure, classify; tool validation failures become a recovery turn
//! 5. convert the (real or synthesized) completion for the client
//!
//! [`TranslatedRequest`]: relay_domain::TranslatedRequest
//! [`ToolSet`]: relay_domain::ToolSet

mod invoke;
mod normalize;
mod recover;

pub use invoke::BackendInvoker;

use crate::config::RelayParams;
use crate::ports::completion_backend::CompletionBackend;
use crate::ports::relay_logger::{NoRelayLogger, RelayLogger};
use crate::use_cases::intercept_web_search::WebSearchInterceptor;
use relay_domain::{
    ClassifiedError, DomainError, FailureKind, MessagesRequest, MessagesResponse,
    RequestNormalizer, to_messages_response,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Errors surfaced to the client by [`RelayMessageUseCase`].
#[derive(Error, Debug)]
pub enum RelayError {
    /// The inbound request cannot be forwarded as received.
    #[error(transparent)]
    Request(DomainError),

    /// The backend answered 2xx with a body the relay cannot convert.
    #[error("Backend returned an unusable completion: {0}")]
    InvalidCompletion(String),

    /// A backend failure that is not a tool validation failure.
    #[error("Backend error ({status_code}): {message}")]
    Backend {
        kind: FailureKind,
        status_code: u16,
        message: String,
    },
}

impl RelayError {
    /// Status code the client should see for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Request(_) => 400,
            RelayError::InvalidCompletion(_) => 502,
            RelayError::Backend { status_code, .. } => *status_code,
        }
    }
}

impl From<ClassifiedError> for RelayError {
    fn from(classified: ClassifiedError) -> Self {
        match classified {
            ClassifiedError::GenericBackendFailure {
                kind,
                status_code,
                raw_message,
            } => RelayError::Backend {
                kind,
                status_code,
                message: raw_message,
            },
            // Only reached if a caller bypasses recovery.
            ClassifiedError::ToolValidationFailure {
                offending_tool_name,
            } => RelayError::Backend {
                kind: FailureKind::Status,
                status_code: 400,
                message: format!(
                    "tool call validation failed for {}",
                    offending_tool_name.as_deref().unwrap_or("an undeclared tool")
                ),
            },
        }
    }
}

/// Result of a successful relay.
#[derive(Debug, Clone)]
pub struct RelayOutcome {
    pub response: MessagesResponse,
    /// Whether the response is a synthesized recovery turn.
    pub recovered: bool,
    pub request_id: String,
}

/// Use case for relaying a Messages request to the completion backend.
#[derive(Clone)]
pub struct RelayMessageUseCase {
    normalizer: RequestNormalizer,
    invoker: BackendInvoker,
    logger: Arc<dyn RelayLogger>,
    web_search: Option<WebSearchInterceptor>,
}

impl RelayMessageUseCase {
    pub fn new(backend: Arc<dyn CompletionBackend>, params: &RelayParams) -> Self {
        Self {
            normalizer: RequestNormalizer::new(params.models.clone(), params.max_tokens_limit),
            invoker: BackendInvoker::new(backend, params.request_timeout),
            logger: Arc::new(NoRelayLogger),
            web_search: None,
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn RelayLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_web_search(mut self, interceptor: WebSearchInterceptor) -> Self {
        self.web_search = Some(interceptor);
        self
    }

    pub fn normalizer(&self) -> &RequestNormalizer {
        &self.normalizer
    }

    pub async fn execute(&self, mut request: MessagesRequest) -> Result<RelayOutcome, RelayError> {
        let request_id = new_request_id();
        info!(
            request_id = %request_id,
            model = request.model.as_deref().unwrap_or("<missing>"),
            messages = request.message_list().len(),
            tools = request.tool_declarations().len(),
            "Relaying message request"
        );

        if let Some(interceptor) = &self.web_search {
            interceptor
                .intercept(&mut request, self.logger.as_ref(), &request_id)
                .await;
        }

        let translated = normalize::normalize_request(
            &self.normalizer,
            &request,
            self.logger.as_ref(),
            &request_id,
        )
        .map_err(RelayError::Request)?;

        let (completion, recovered) = match self
            .invoker
            .invoke(&translated, self.logger.as_ref(), &request_id)
            .await
        {
            Ok(completion) => (completion, false),
            Err(failure) => {
                let recovery =
                    recover::recover(failure, &translated, self.logger.as_ref(), &request_id)?;
                (recovery.into_completion(), true)
            }
        };

        let requested_model = request.model.as_deref().unwrap_or(&translated.model);
        let response = to_messages_response(&completion, requested_model)
            .map_err(|e| RelayError::InvalidCompletion(e.to_string()))?;

        debug!(
            request_id = %request_id,
            stop_reason = ?response.stop_reason,
            recovered,
            "Relay complete"
        );

        Ok(RelayOutcome {
            response,
            recovered,
            request_id,
        })
    }
}

fn new_request_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("req_{}", &id[..12])
}
