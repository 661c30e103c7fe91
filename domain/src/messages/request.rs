//! Inbound request body for `POST /v1/messages`.
//!
//! Required fields are modelled as `Option` on purpose: a missing `model`
//! or `messages` must surface as a [`DomainError::MalformedRequest`]
//! from the normalizer, not as a deserializer rejection with a different
//! error shape.
//!
//! [`DomainError::MalformedRequest`]: crate::core::error::DomainError::MalformedRequest

use crate::core::tokens::input_tokens_for_chars;
use serde::{Deserialize, Serialize};

fn empty_object_schema() -> serde_json::Value {
    serde_json::json!({"type": "object", "properties": {}})
}

/// Inbound Messages API request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagesRequest {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub messages: Option<Vec<InboundMessage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemPrompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDeclaration>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl MessagesRequest {
    pub fn is_streaming(&self) -> bool {
        self.stream.unwrap_or(false)
    }

    pub fn tool_declarations(&self) -> &[ToolDeclaration] {
        self.tools.as_deref().unwrap_or_default()
    }

    pub fn message_list(&self) -> &[InboundMessage] {
        self.messages.as_deref().unwrap_or_default()
    }

    /// Names of every tool the conversation history claims was called.
    ///
    /// Walks `tool_use` blocks in message order; duplicates are kept.
    pub fn referenced_tool_names(&self) -> impl Iterator<Item = &str> {
        self.message_list()
            .iter()
            .flat_map(|m| m.content.blocks())
            .filter_map(|b| match b {
                ContentBlock::ToolUse { name, .. } => Some(name.as_str()),
                _ => None,
            })
    }

    /// Rough input token estimate: four characters per token, rounded
    /// down, minimum one.
    ///
    /// Counts system text and every text-bearing message block. Images and
    /// tool call arguments are not counted.
    pub fn estimate_input_tokens(&self) -> u32 {
        let system_chars = self.system.as_ref().map_or(0, |s| s.text().chars().count());
        let message_chars: usize = self
            .message_list()
            .iter()
            .map(|m| match &m.content {
                MessageContent::Text(text) => text.chars().count(),
                MessageContent::Blocks(blocks) => blocks
                    .iter()
                    .filter_map(ContentBlock::text)
                    .map(|t| t.chars().count())
                    .sum(),
            })
            .sum();
        input_tokens_for_chars(system_chars + message_chars)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One role-tagged message in the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub role: Role,
    pub content: MessageContent,
}

impl InboundMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
        }
    }
}

/// Message content: either a bare string or a list of typed blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl MessageContent {
    pub fn blocks(&self) -> &[ContentBlock] {
        match self {
            MessageContent::Text(_) => &[],
            MessageContent::Blocks(blocks) => blocks,
        }
    }

    pub fn blocks_mut(&mut self) -> &mut [ContentBlock] {
        match self {
            MessageContent::Text(_) => &mut [],
            MessageContent::Blocks(blocks) => blocks,
        }
    }
}

/// A typed content block inside a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Image {
        source: ImageSource,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: serde_json::Value,
    },
    ToolResult {
        tool_use_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<ToolResultContent>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
    /// Block types the backend has no equivalent for (e.g. `thinking`).
    #[serde(other)]
    Unsupported,
}

impl ContentBlock {
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSource {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub data: String,
}

impl ImageSource {
    /// Render as a `data:` URI for the backend's `image_url` part.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// Content of a `tool_result` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolResultContent {
    Text(String),
    Blocks(Vec<serde_json::Value>),
}

impl ToolResultContent {
    /// Flatten to plain text for the backend's `tool` message.
    ///
    /// Text blocks contribute their text; any other block is JSON-encoded.
    pub fn to_text(&self) -> String {
        match self {
            ToolResultContent::Text(text) => text.clone(),
            ToolResultContent::Blocks(blocks) => blocks
                .iter()
                .map(|block| match block.get("text").and_then(|t| t.as_str()) {
                    Some(text) if block.get("type").and_then(|t| t.as_str()) == Some("text") => {
                        text.to_string()
                    }
                    _ => block.to_string(),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// The `system` field: a string or a list of text blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SystemPrompt {
    Text(String),
    Blocks(Vec<SystemBlock>),
}

impl SystemPrompt {
    /// Join all system text; blocks are separated by a blank line.
    pub fn text(&self) -> String {
        match self {
            SystemPrompt::Text(text) => text.clone(),
            SystemPrompt::Blocks(blocks) => blocks
                .iter()
                .map(|b| b.text.as_str())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

/// A tool declared by the orchestrator for this request only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDeclaration {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "empty_object_schema")]
    pub input_schema: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolChoice {
    Auto,
    Any,
    None,
    Tool { name: String },
}
