//! OpenAI-compatible Chat Completions adapter.
//!
//! Sends one `POST {base_url}/chat/completions` per call with bearer auth
//! and, for Azure deployments, an `api-version` query parameter. Non-2xx
//! answers are returned as [`BackendFailure`]s carrying the body verbatim.

use async_trait::async_trait;
use relay_application::ports::completion_backend::CompletionBackend;
use relay_domain::{BackendFailure, ChatCompletion, TranslatedRequest};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct OpenAiBackendConfig {
    /// Base URL up to (not including) `/chat/completions`.
    pub base_url: String,
    pub api_key: Option<String>,
    /// Azure `api-version` query parameter.
    pub api_version: Option<String>,
    /// Client-side ceiling; the relay's own timeout normally fires first.
    pub timeout: Duration,
}

pub struct OpenAiBackend {
    client: Client,
    config: OpenAiBackendConfig,
}

impl OpenAiBackend {
    pub fn new(config: OpenAiBackendConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn map_send_error(&self, e: reqwest::Error) -> BackendFailure {
        if e.is_timeout() {
            BackendFailure::timeout(self.config.timeout)
        } else {
            BackendFailure::transport(e.to_string())
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, request: &TranslatedRequest) -> Result<ChatCompletion, BackendFailure> {
        let mut builder = self.client.post(self.endpoint()).json(request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }
        if let Some(version) = &self.config.api_version {
            builder = builder.query(&[("api-version", version)]);
        }

        debug!(
            model = %request.model,
            tools = request.tool_set.len(),
            "Sending chat completion request"
        );
        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Backend returned an error status");
            return Err(BackendFailure::from_status(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Backend completion body could not be parsed");
            BackendFailure::transport(format!("unreadable completion body: {}", e))
        })
    }
}
