//! Client → backend model mapping (`[models]` section)

use super::validation::{ConfigIssue, ConfigIssueCode};
use relay_domain::ModelMap;
use serde::{Deserialize, Serialize};

/// Backend models for each Claude model family.
///
/// ```toml
/// [models]
/// big_model = "gpt-4o"          # opus and unrecognised names
/// middle_model = "gpt-4o"       # sonnet
/// small_model = "gpt-4o-mini"   # haiku, connection tests
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub big_model: String,
    pub middle_model: String,
    pub small_model: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        let defaults = ModelMap::default();
        Self {
            big_model: defaults.big_model,
            middle_model: defaults.middle_model,
            small_model: defaults.small_model,
        }
    }
}

impl FileModelsConfig {
    pub fn to_model_map(&self) -> ModelMap {
        ModelMap::new(
            self.big_model.trim(),
            self.middle_model.trim(),
            self.small_model.trim(),
        )
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("big_model", &self.big_model),
            ("middle_model", &self.middle_model),
            ("small_model", &self.small_model),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| {
            ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    field: field.to_string(),
                },
                format!("models.{}: model name cannot be empty", field),
            )
        })
        .collect()
    }
}
