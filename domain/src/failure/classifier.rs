//! Pattern matchers that turn a [`BackendFailure`] into a [`ClassifiedError`].
//!
//! # Recognised patterns
//!
//! | Matcher | Phrase | Extracted |
//! |---------|--------|-----------|
//! | [`ToolValidationMatcher`] | `tool call validation failed` | name in `attempted to call tool '<name>'` |
//!
//! Both phrases match regardless of letter case; the captured name keeps
//! its casing.
//!
//! Anything no matcher recognises is a [`ClassifiedError::GenericBackendFailure`].
//! Timeouts and transport failures never reach the matchers: the backend
//! did not produce a validation verdict for them.

use super::backend_failure::{BackendFailure, FailureKind};
use regex::Regex;
use std::sync::LazyLock;

static VALIDATION_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)tool\s+call\s+validation\s+failed")
        .expect("validation phrase pattern is valid")
});

static OFFENDING_TOOL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)attempted\s+to\s+call\s+tool\s+'([^'\s]+)'")
        .expect("offending tool pattern is valid")
});

/// The closed set of failure kinds the recovery layer reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedError {
    /// The model called a tool that was not declared in this request.
    ///
    /// `offending_tool_name` is `None` when the backend message matched the
    /// validation phrase but the quoted name could not be extracted.
    ToolValidationFailure { offending_tool_name: Option<String> },
    /// Anything else. Never converted into a recovery turn.
    GenericBackendFailure {
        kind: FailureKind,
        status_code: u16,
        raw_message: String,
    },
}

impl ClassifiedError {
    pub fn is_tool_validation(&self) -> bool {
        matches!(self, ClassifiedError::ToolValidationFailure { .. })
    }

    /// Short tag for log events.
    pub fn tag(&self) -> &'static str {
        match self {
            ClassifiedError::ToolValidationFailure { .. } => "tool_validation_failure",
            ClassifiedError::GenericBackendFailure { .. } => "generic_backend_failure",
        }
    }
}

/// Recognises the backend's "tool not in request.tools" rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolValidationMatcher;

impl ToolValidationMatcher {
    /// Whether `message` carries the fixed validation-failure phrase.
    pub fn matches(&self, message: &str) -> bool {
        VALIDATION_PHRASE.is_match(message)
    }

    /// The single-quoted tool name following `attempted to call tool`.
    ///
    /// The name is returned exactly as quoted, casing included.
    pub fn offending_tool(&self, message: &str) -> Option<String> {
        OFFENDING_TOOL
            .captures(message)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn classify(&self, message: &str) -> Option<ClassifiedError> {
        if !self.matches(message) {
            return None;
        }
        Some(ClassifiedError::ToolValidationFailure {
            offending_tool_name: self.offending_tool(message),
        })
    }
}

/// Classify a captured backend failure. Pure and total.
pub fn classify(failure: &BackendFailure) -> ClassifiedError {
    if failure.kind() == FailureKind::Status
        && let Some(classified) = ToolValidationMatcher.classify(failure.raw_message())
    {
        return classified;
    }

    ClassifiedError::GenericBackendFailure {
        kind: failure.kind(),
        status_code: failure.status_code(),
        raw_message: failure.raw_message().to_string(),
    }
}
