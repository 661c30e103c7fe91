//! Request normalizer: inbound Messages request → backend request.

use super::model_map::ModelMap;
use crate::completion::{
    BackendToolChoice, ChatMessage, ContentPart, ImageUrl, ToolCall, TranslatedRequest,
    UserContent,
};
use crate::core::error::DomainError;
use crate::messages::{
    ContentBlock, InboundMessage, MessageContent, MessagesRequest, Role, ToolChoice,
};
use crate::tool::ToolSet;

/// `max_tokens` used when the client sends none.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Builds [`TranslatedRequest`]s from inbound requests.
///
/// Holds only configuration; every call works on its own request and
/// produces a fresh [`ToolSet`].
#[derive(Debug, Clone)]
pub struct RequestNormalizer {
    model_map: ModelMap,
    max_tokens_limit: u32,
}

impl RequestNormalizer {
    pub fn new(model_map: ModelMap, max_tokens_limit: u32) -> Self {
        Self {
            model_map,
            max_tokens_limit: max_tokens_limit.max(1),
        }
    }

    pub fn model_map(&self) -> &ModelMap {
        &self.model_map
    }

    /// Translate one inbound request.
    ///
    /// # Errors
    ///
    /// - [`DomainError::MalformedRequest`] when `model` or `messages` is
    ///   missing or empty, or a tool declaration has an empty name.
    /// - [`DomainError::Unsupported`] when streaming is requested.
    pub fn normalize(&self, request: &MessagesRequest) -> Result<TranslatedRequest, DomainError> {
        if request.is_streaming() {
            return Err(DomainError::Unsupported(
                "streaming responses are not supported; send \"stream\": false".to_string(),
            ));
        }

        let model = request
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| DomainError::malformed("missing required field `model`"))?;

        let messages = request
            .messages
            .as_ref()
            .ok_or_else(|| DomainError::malformed("missing required field `messages`"))?;
        if messages.is_empty() {
            return Err(DomainError::malformed(
                "`messages` must contain at least one message",
            ));
        }

        let tool_set = ToolSet::from_declarations(request.tool_declarations())?;
        // A tool_choice without tools is rejected by backends; drop it with the tools.
        let tool_choice = if tool_set.is_empty() {
            None
        } else {
            request.tool_choice.as_ref().map(convert_tool_choice)
        };

        let mut translated = Vec::with_capacity(messages.len() + 1);
        if let Some(system) = &request.system {
            let text = system.text();
            if !text.is_empty() {
                translated.push(ChatMessage::System { content: text });
            }
        }
        for message in messages {
            translate_message(message, &mut translated);
        }

        let max_tokens = request
            .max_tokens
            .unwrap_or(DEFAULT_MAX_TOKENS)
            .clamp(1, self.max_tokens_limit);

        Ok(TranslatedRequest {
            model: self.model_map.resolve(model),
            messages: translated,
            max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            stop: request.stop_sequences.clone().filter(|s| !s.is_empty()),
            tool_set,
            tool_choice,
            stream: false,
        })
    }
}

fn convert_tool_choice(choice: &ToolChoice) -> BackendToolChoice {
    match choice {
        ToolChoice::Auto => BackendToolChoice::mode("auto"),
        ToolChoice::Any => BackendToolChoice::mode("required"),
        ToolChoice::None => BackendToolChoice::mode("none"),
        ToolChoice::Tool { name } => BackendToolChoice::named(name),
    }
}

fn translate_message(message: &InboundMessage, out: &mut Vec<ChatMessage>) {
    match (message.role, &message.content) {
        (Role::User, MessageContent::Text(text)) => out.push(ChatMessage::User {
            content: UserContent::Text(text.clone()),
        }),
        (Role::User, MessageContent::Blocks(blocks)) => translate_user_blocks(blocks, out),
        (Role::Assistant, MessageContent::Text(text)) => out.push(ChatMessage::Assistant {
            content: Some(text.clone()),
            tool_calls: Vec::new(),
        }),
        (Role::Assistant, MessageContent::Blocks(blocks)) => {
            out.push(translate_assistant_blocks(blocks))
        }
    }
}

/// Tool results become `tool` messages and go first, directly after the
/// assistant turn that issued the calls; remaining text and images follow
/// as one user message.
fn translate_user_blocks(blocks: &[ContentBlock], out: &mut Vec<ChatMessage>) {
    let mut parts = Vec::new();
    let mut has_image = false;

    for block in blocks {
        match block {
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                ..
            } => out.push(ChatMessage::Tool {
                tool_call_id: tool_use_id.clone(),
                content: content.as_ref().map(|c| c.to_text()).unwrap_or_default(),
            }),
            ContentBlock::Text { text } => parts.push(ContentPart::Text { text: text.clone() }),
            ContentBlock::Image { source } => {
                has_image = true;
                parts.push(ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: source.to_data_uri(),
                    },
                });
            }
            ContentBlock::ToolUse { .. } | ContentBlock::Unsupported => {}
        }
    }

    if parts.is_empty() {
        return;
    }

    let content = if has_image {
        UserContent::Parts(parts)
    } else {
        UserContent::Text(
            parts
                .into_iter()
                .filter_map(|p| match p {
                    ContentPart::Text { text } => Some(text),
                    ContentPart::ImageUrl { .. } => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        )
    };
    out.push(ChatMessage::User { content });
}

fn translate_assistant_blocks(blocks: &[ContentBlock]) -> ChatMessage {
    let mut texts = Vec::new();
    let mut tool_calls = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Text { text } => texts.push(text.as_str()),
            ContentBlock::ToolUse { id, name, input } => {
                tool_calls.push(ToolCall::function(id, name, input.to_string()));
            }
            ContentBlock::Image { .. }
            | ContentBlock::ToolResult { .. }
            | ContentBlock::Unsupported => {}
        }
    }

    let text = texts.join("\n");
    let content = if text.is_empty() && !tool_calls.is_empty() {
        None
    } else {
        Some(text)
    };
    ChatMessage::Assistant {
        content,
        tool_calls,
    }
}
