//! Client authentication (`[auth]` section)

use super::validation::resolve_secret;
use serde::{Deserialize, Serialize};

/// When a key resolves, every client request must present it via
/// `x-api-key` or `Authorization: Bearer`. Otherwise validation is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuthConfig {
    /// Environment variable holding the expected client key
    /// (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    pub api_key: Option<String>,
}

impl Default for FileAuthConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
        }
    }
}

impl FileAuthConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_secret(self.api_key.as_deref(), &self.api_key_env)
    }
}
