//! Shared state for the HTTP handlers.

use relay_application::{ProbeBackendUseCase, RelayMessageUseCase};
use relay_domain::ModelMap;
use serde::Serialize;

/// Non-secret configuration summary shown on `/` and `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub backend_base_url: String,
    pub backend_api_key_configured: bool,
    pub models: ModelMap,
    pub max_tokens_limit: u32,
    pub request_timeout_secs: u64,
    pub web_search_enabled: bool,
}

pub struct AppState {
    pub relay: RelayMessageUseCase,
    pub probe: ProbeBackendUseCase,
    /// Expected client key; `None` disables client authentication.
    pub client_api_key: Option<String>,
    pub info: ServiceInfo,
}

impl AppState {
    pub fn new(relay: RelayMessageUseCase, probe: ProbeBackendUseCase, info: ServiceInfo) -> Self {
        Self {
            relay,
            probe,
            client_api_key: None,
            info,
        }
    }

    pub fn with_client_api_key(mut self, key: Option<String>) -> Self {
        self.client_api_key = key;
        self
    }

    pub fn client_auth_enabled(&self) -> bool {
        self.client_api_key.is_some()
    }
}
