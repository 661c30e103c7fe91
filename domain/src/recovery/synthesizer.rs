//! Builds [`RecoveryResponse`]s.

use crate::completion::{ChatCompletion, FinishReason, Usage};
use crate::core::tokens::estimate_tokens;
use crate::failure::ClassifiedError;
use crate::tool::ToolSet;
use chrono::Utc;
use uuid::Uuid;

/// Identity of one synthesized response: a fresh id and creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseStamp {
    pub id: String,
    pub created: i64,
}

impl ResponseStamp {
    /// A never-before-used id stamped with the current UTC time.
    pub fn fresh() -> Self {
        Self {
            id: format!("chatcmpl-relay-{}", Uuid::new_v4().simple()),
            created: Utc::now().timestamp(),
        }
    }
}

/// A completion written by the relay rather than the backend.
///
/// Carries the same envelope as a real backend completion (one assistant
/// message, `finish_reason = "stop"`, usage accounting), so the caller's
/// conversation loop treats it as an ordinary turn.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryResponse {
    completion: ChatCompletion,
    offending_tool_name: Option<String>,
}

impl RecoveryResponse {
    pub fn completion(&self) -> &ChatCompletion {
        &self.completion
    }

    pub fn into_completion(self) -> ChatCompletion {
        self.completion
    }

    pub fn offending_tool_name(&self) -> Option<&str> {
        self.offending_tool_name.as_deref()
    }

    pub fn guidance(&self) -> &str {
        self.completion
            .first_choice()
            .and_then(|c| c.message.content.as_deref())
            .unwrap_or_default()
    }
}

fn available_tools_sentence(tool_set: &ToolSet) -> String {
    if tool_set.is_empty() {
        "No tools are available in this request, so answer directly without calling a tool."
            .to_string()
    } else {
        format!(
            "The tools available in this request are: {}. Use only these exact names, or answer \
             directly without calling a tool.",
            tool_set.names().join(", ")
        )
    }
}

/// Guidance text shown to the model after a rejected tool call.
pub fn guidance_text(offending_tool_name: Option<&str>, tool_set: &ToolSet) -> String {
    let lead = match offending_tool_name {
        Some(name) => format!(
            "The tool '{}' is not available in this request, so the call was not executed.",
            name
        ),
        None => "A tool call was rejected because it named a tool that is not available in this \
                 request. Re-check the available tool list before calling a tool."
            .to_string(),
    };
    format!("{} {}", lead, available_tools_sentence(tool_set))
}

/// Build the recovery completion for one tool validation failure.
///
/// Usage reflects only the guidance text: no prompt was processed by the
/// backend, so `prompt_tokens` is zero.
pub fn synthesize(
    offending_tool_name: Option<&str>,
    tool_set: &ToolSet,
    model: &str,
    stamp: ResponseStamp,
) -> RecoveryResponse {
    let guidance = guidance_text(offending_tool_name, tool_set);
    let usage = Usage::new(0, estimate_tokens(&guidance));
    RecoveryResponse {
        completion: ChatCompletion::single_text(
            stamp.id,
            stamp.created,
            model,
            guidance,
            FinishReason::Stop,
            usage,
        ),
        offending_tool_name: offending_tool_name.map(str::to_string),
    }
}

/// Convert a tool validation failure into a recovery turn; hand anything
/// else back unchanged.
pub fn resolve(
    classified: ClassifiedError,
    tool_set: &ToolSet,
    model: &str,
) -> Result<RecoveryResponse, ClassifiedError> {
    match classified {
        ClassifiedError::ToolValidationFailure {
            offending_tool_name,
        } => Ok(synthesize(
            offending_tool_name.as_deref(),
            tool_set,
            model,
            ResponseStamp::fresh(),
        )),
        generic @ ClassifiedError::GenericBackendFailure { .. } => Err(generic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::{BackendFailure, FailureKind, classify};
    use crate::tool::ToolDescriptor;
    use serde_json::json;

    fn tool_set(names: &[&str]) -> ToolSet {
        let mut set = ToolSet::new();
        for name in names {
            set.insert(ToolDescriptor::new(*name, json!({"type": "object"})));
        }
        set
    }

    fn stamp() -> ResponseStamp {
        ResponseStamp {
            id: "chatcmpl-relay-test".to_string(),
            created: 1_700_000_000,
        }
    }

    #[test]
    fn names_offending_tool_and_stops_normally() {
        let response = synthesize(Some("LS"), &tool_set(&["Read", "Grep"]), "kimi-k2", stamp());

        assert!(response.guidance().contains("'LS'"));
        assert!(response.guidance().contains("Read, Grep"));
        assert_eq!(response.offending_tool_name(), Some("LS"));

        let completion = response.completion();
        assert_eq!(completion.id, "chatcmpl-relay-test");
        assert_eq!(completion.model, "kimi-k2");
        assert_eq!(completion.choices.len(), 1);
        let choice = &completion.choices[0];
        assert_eq!(choice.message.role, "assistant");
        assert_eq!(choice.finish_reason, Some(FinishReason::Stop));
        assert!(choice.message.tool_calls().is_empty());
    }

    #[test]
    fn generic_guidance_without_name() {
        let response = synthesize(None, &tool_set(&["Read"]), "m", stamp());
        assert!(response.guidance().contains("Re-check the available tool list"));
        assert!(response.offending_tool_name().is_none());
        assert_eq!(
            response.completion().choices[0].finish_reason,
            Some(FinishReason::Stop)
        );
    }

    #[test]
    fn empty_tool_set_guidance() {
        let response = synthesize(Some("Bash"), &ToolSet::new(), "m", stamp());
        assert!(response.guidance().contains("No tools are available"));
    }

    #[test]
    fn usage_matches_guidance_length() {
        let response = synthesize(Some("LS"), &tool_set(&["Read"]), "m", stamp());
        let usage = response.completion().usage.unwrap();
        assert_eq!(usage.prompt_tokens, 0);
        assert_eq!(usage.completion_tokens, estimate_tokens(response.guidance()));
        assert!(usage.completion_tokens > 0);
        assert_eq!(usage.total_tokens, usage.prompt_tokens + usage.completion_tokens);
    }

    #[test]
    fn envelope_serializes_like_backend_completion() {
        let response = synthesize(Some("LS"), &tool_set(&["Read"]), "m", stamp());
        let value = serde_json::to_value(response.completion()).unwrap();
        assert_eq!(value["object"], "chat.completion");
        assert_eq!(value["choices"][0]["finish_reason"], "stop");
        assert_eq!(value["choices"][0]["message"]["role"], "assistant");
        assert!(value["usage"]["total_tokens"].as_u64().unwrap() > 0);

        let back: ChatCompletion = serde_json::from_value(value).unwrap();
        assert_eq!(&back, response.completion());
    }

    #[test]
    fn fresh_stamps_are_unique() {
        let a = ResponseStamp::fresh();
        let b = ResponseStamp::fresh();
        assert_ne!(a.id, b.id);
        assert!(b.created >= a.created);
    }

    #[test]
    fn resolve_converts_tool_validation_scenario() {
        let failure = BackendFailure::from_status(
            400,
            "tool call validation failed: attempted to call tool 'LS' which was not in request.tools",
        );
        let response = resolve(classify(&failure), &tool_set(&["Read"]), "m").unwrap();
        assert!(response.guidance().contains("LS"));
        assert_eq!(
            response.completion().choices[0].finish_reason.as_ref().map(|r| r.as_str()),
            Some("stop")
        );
    }

    #[test]
    fn resolve_never_converts_generic_failures() {
        let failure = BackendFailure::from_status(500, "internal server error");
        let err = resolve(classify(&failure), &tool_set(&["Read"]), "m").unwrap_err();
        assert_eq!(
            err,
            ClassifiedError::GenericBackendFailure {
                kind: FailureKind::Status,
                status_code: 500,
                raw_message: "internal server error".to_string(),
            }
        );
    }
}
