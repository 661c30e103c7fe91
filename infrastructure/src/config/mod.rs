//! Configuration file loading for tool-relay
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TOOL_RELAY_*` environment variables (`__` for nesting)
//! 2. `--config <path>` specified file
//! 3. Project root: `./tool-relay.toml`
//! 4. Global: `~/.config/tool-relay/config.toml`
//! 5. Default values
//!
//! Secrets are never read from these sources directly by default: each
//! `api_key_env` field names the environment variable that holds the key.

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, ConfigIssueCode, FileAuthConfig, FileBackendConfig, FileConfig,
    FileLoggingConfig, FileModelsConfig, FileServerConfig, FileWebSearchConfig, Severity,
};
pub use loader::{ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
