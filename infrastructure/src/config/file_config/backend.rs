//! Completion backend configuration (`[backend]` section)

use super::validation::{ConfigIssue, ConfigIssueCode, check_url, resolve_secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible backend settings.
///
/// # Example
///
/// ```toml
/// [backend]
/// base_url = "https://my-resource.openai.azure.com/openai/deployments/gpt-4o"
/// api_key_env = "AZURE_OPENAI_API_KEY"
/// api_version = "2024-06-01"
/// request_timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Base URL up to (not including) `/chat/completions`.
    pub base_url: String,
    /// Environment variable holding the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Azure `api-version` query parameter.
    pub api_version: Option<String>,
    /// Upper bound on one backend call, in seconds.
    pub request_timeout_secs: u64,
    /// Ceiling applied to the client's `max_tokens`.
    pub max_tokens_limit: u32,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            api_version: None,
            request_timeout_secs: 90,
            max_tokens_limit: 4096,
        }
    }
}

impl FileBackendConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_secret(self.api_key.as_deref(), &self.api_key_env)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(check_url("backend.base_url", &self.base_url));
        if self.request_timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: "backend.request_timeout_secs".to_string(),
                },
                "backend.request_timeout_secs cannot be 0",
            ));
        }
        if self.max_tokens_limit == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: "backend.max_tokens_limit".to_string(),
                },
                "backend.max_tokens_limit cannot be 0",
            ));
        }
        if self.resolve_api_key().is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingSecret {
                    field: "backend.api_key_env".to_string(),
                    env: self.api_key_env.clone(),
                },
                format!(
                    "{} is not set; backend calls will be sent without credentials",
                    self.api_key_env
                ),
            ));
        }
        issues
    }
}
