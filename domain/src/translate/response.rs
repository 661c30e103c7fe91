//! Response converter: backend completion → client message.

use crate::completion::{ChatCompletion, FinishReason};
use crate::core::error::DomainError;
use crate::messages::{MessagesResponse, MessagesUsage, ResponseBlock, StopReason};
use uuid::Uuid;

fn stop_reason(finish_reason: Option<&FinishReason>) -> StopReason {
    match finish_reason {
        Some(FinishReason::Length) => StopReason::MaxTokens,
        Some(FinishReason::ToolCalls) => StopReason::ToolUse,
        Some(FinishReason::Stop | FinishReason::ContentFilter | FinishReason::Other(_)) | None => {
            StopReason::EndTurn
        }
    }
}

/// Parse model-produced arguments; unparseable text is kept under `raw_arguments`.
fn parse_arguments(arguments: &str) -> serde_json::Value {
    if arguments.trim().is_empty() {
        return serde_json::json!({});
    }
    serde_json::from_str(arguments)
        .unwrap_or_else(|_| serde_json::json!({ "raw_arguments": arguments }))
}

/// Convert a completion (real or synthesized) into the client's envelope.
///
/// `requested_model` is echoed back unchanged, so clients see the model
/// name they asked for rather than the mapped backend model.
///
/// # Errors
///
/// [`DomainError::InvalidCompletion`] when the completion has no choices.
pub fn to_messages_response(
    completion: &ChatCompletion,
    requested_model: &str,
) -> Result<MessagesResponse, DomainError> {
    let choice = completion
        .first_choice()
        .ok_or_else(|| DomainError::InvalidCompletion("no choices in completion".to_string()))?;

    let mut content = Vec::new();
    if let Some(text) = choice.message.content.as_deref().filter(|t| !t.is_empty()) {
        content.push(ResponseBlock::Text {
            text: text.to_string(),
        });
    }
    for call in choice.message.tool_calls() {
        content.push(ResponseBlock::ToolUse {
            id: call.id.clone(),
            name: call.function.name.clone(),
            input: parse_arguments(&call.function.arguments),
        });
    }
    if content.is_empty() {
        content.push(ResponseBlock::Text {
            text: String::new(),
        });
    }

    let usage = completion.usage.unwrap_or_default();
    let id = if completion.id.is_empty() {
        format!("msg_{}", Uuid::new_v4().simple())
    } else {
        completion.id.clone()
    };

    Ok(MessagesResponse {
        id,
        kind: "message".to_string(),
        role: "assistant".to_string(),
        model: requested_model.to_string(),
        content,
        stop_reason: stop_reason(choice.finish_reason.as_ref()),
        stop_sequence: None,
        usage: MessagesUsage {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
        },
    })
}
