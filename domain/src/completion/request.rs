//! Backend request body.

use crate::tool::ToolSet;
use serde::{Deserialize, Serialize};

fn function_kind() -> String {
    "function".to_string()
}

/// The request actually sent to the backend.
///
/// `tool_set` serializes as the backend's `tools` array and is omitted
/// entirely when empty; it is the same [`ToolSet`] the normalizer built
/// from the inbound declarations.
#[derive(Debug, Clone, Serialize)]
pub struct TranslatedRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    #[serde(rename = "tools", skip_serializing_if = "ToolSet::is_empty")]
    pub tool_set: ToolSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<BackendToolChoice>,
    pub stream: bool,
}

impl TranslatedRequest {
    /// Minimal single-turn request, used for connectivity probes.
    pub fn probe(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::User {
                content: UserContent::Text("Hello".to_string()),
            }],
            max_tokens,
            temperature: None,
            top_p: None,
            stop: None,
            tool_set: ToolSet::new(),
            tool_choice: None,
            stream: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    System {
        content: String,
    },
    User {
        content: UserContent,
    },
    Assistant {
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    Tool {
        tool_call_id: String,
        content: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// A model-issued function call, as carried in assistant messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    pub function: FunctionCall,
}

impl ToolCall {
    pub fn function(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: function_kind(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments, exactly as produced by the model.
    #[serde(default)]
    pub arguments: String,
}

/// Backend `tool_choice`: a mode string or a named function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackendToolChoice {
    Mode(String),
    Named {
        #[serde(rename = "type")]
        kind: String,
        function: NamedFunction,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedFunction {
    pub name: String,
}

impl BackendToolChoice {
    pub fn mode(mode: &str) -> Self {
        BackendToolChoice::Mode(mode.to_string())
    }

    pub fn named(name: impl Into<String>) -> Self {
        BackendToolChoice::Named {
            kind: function_kind(),
            function: NamedFunction { name: name.into() },
        }
    }
}
