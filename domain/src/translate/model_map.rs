//! Client model name → backend model name mapping.

use serde::{Deserialize, Serialize};

/// Prefixes of model names that already belong to the backend.
const BACKEND_NATIVE_PREFIXES: &[&str] = &[
    "gpt-",
    "o1-",
    "o3-",
    "o4-",
    "ep-",
    "doubao-",
    "deepseek-",
    "kimi-",
    "moonshotai/",
];

/// Three-tier mapping from Claude model families to backend models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMap {
    /// Used for `opus` and anything unrecognised.
    pub big_model: String,
    /// Used for `sonnet`.
    pub middle_model: String,
    /// Used for `haiku` and connectivity probes.
    pub small_model: String,
}

impl Default for ModelMap {
    fn default() -> Self {
        Self {
            big_model: "gpt-4o".to_string(),
            middle_model: "gpt-4o".to_string(),
            small_model: "gpt-4o-mini".to_string(),
        }
    }
}

impl ModelMap {
    pub fn new(
        big_model: impl Into<String>,
        middle_model: impl Into<String>,
        small_model: impl Into<String>,
    ) -> Self {
        Self {
            big_model: big_model.into(),
            middle_model: middle_model.into(),
            small_model: small_model.into(),
        }
    }

    /// Resolve the backend model for a client-requested model name.
    pub fn resolve(&self, requested: &str) -> String {
        if BACKEND_NATIVE_PREFIXES
            .iter()
            .any(|prefix| requested.starts_with(prefix))
        {
            return requested.to_string();
        }

        let lower = requested.to_lowercase();
        if lower.contains("haiku") {
            self.small_model.clone()
        } else if lower.contains("sonnet") {
            self.middle_model.clone()
        } else {
            self.big_model.clone()
        }
    }
}
