//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional and falls back to its defaults.

mod auth;
mod backend;
mod logging;
mod models;
mod server;
mod validation;
mod web_search;

pub use auth::FileAuthConfig;
pub use backend::FileBackendConfig;
pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use server::FileServerConfig;
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
pub use web_search::FileWebSearchConfig;

use relay_application::RelayParams;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: FileServerConfig,
    pub backend: FileBackendConfig,
    pub models: FileModelsConfig,
    pub auth: FileAuthConfig,
    pub web_search: FileWebSearchConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors make startup impossible; warnings name features that will
    /// run degraded (missing secrets, disabled interception).
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.backend.validate());
        issues.extend(self.models.validate());
        issues.extend(self.web_search.validate());
        issues
    }

    /// Parameters for the relay use cases.
    pub fn relay_params(&self) -> RelayParams {
        RelayParams::default()
            .with_request_timeout(self.backend.request_timeout())
            .with_max_tokens_limit(self.backend.max_tokens_limit)
            .with_models(self.models.to_model_map())
    }
}
