//! Log output locations (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Both paths are optional; CLI flags override them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Daily-rotated diagnostic log file (in addition to stderr).
    pub log_file: Option<PathBuf>,
    /// JSONL file for structured relay events.
    pub event_log: Option<PathBuf>,
}
