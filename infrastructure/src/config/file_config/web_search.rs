//! WebSearch interception (`[web_search]` section)

use super::validation::{ConfigIssue, ConfigIssueCode, check_url, resolve_secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWebSearchConfig {
    /// Interception also requires a resolvable API key.
    pub enabled: bool,
    /// Environment variable holding the Exa key (default: "EXA_API_KEY").
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub num_results: u32,
    pub timeout_secs: u64,
}

impl Default for FileWebSearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: "EXA_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.exa.ai".to_string(),
            num_results: 10,
            timeout_secs: 30,
        }
    }
}

impl FileWebSearchConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_secret(self.api_key.as_deref(), &self.api_key_env)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether interception should be wired up at startup.
    pub fn is_active(&self) -> bool {
        self.enabled && self.resolve_api_key().is_some()
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if !self.enabled {
            return issues;
        }
        issues.extend(check_url("web_search.base_url", &self.base_url));
        if self.num_results == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: "web_search.num_results".to_string(),
                },
                "web_search.num_results cannot be 0",
            ));
        }
        if self.resolve_api_key().is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingSecret {
                    field: "web_search.api_key_env".to_string(),
                    env: self.api_key_env.clone(),
                },
                format!(
                    "{} is not set; WebSearch interception is disabled",
                    self.api_key_env
                ),
            ));
        }
        issues
    }
}
