//! Structured configuration issues.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the relay cannot start with this configuration.
    Error,
    /// Non-fatal: the relay starts but some feature is degraded.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    EmptyModelName { field: String },
    ZeroValue { field: String },
    InvalidUrl { field: String, value: String },
    MissingSecret { field: String, env: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub(super) fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub(super) fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Read a secret: the explicit value wins, then the named environment variable.
///
/// Empty strings count as unset.
pub(super) fn resolve_secret(explicit: Option<&str>, env: &str) -> Option<String> {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var(env).ok())
        .filter(|s| !s.trim().is_empty())
}

/// Reject anything that is not an absolute http(s) URL.
pub(super) fn check_url(field: &str, value: &str) -> Option<ConfigIssue> {
    if value.starts_with("http://") || value.starts_with("https://") {
        None
    } else {
        Some(ConfigIssue::error(
            ConfigIssueCode::InvalidUrl {
                field: field.to_string(),
                value: value.to_string(),
            },
            format!("{}: '{}' is not an http(s) URL", field, value),
        ))
    }
}
