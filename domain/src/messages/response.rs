//! Client-facing message envelope.

use serde::{Deserialize, Serialize};

/// Why the turn ended, in the client's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of the turn.
    EndTurn,
    /// Hit the token limit.
    MaxTokens,
    /// The model wants the client to run tools.
    ToolUse,
    StopSequence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A complete assistant message as returned from `POST /v1/messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub role: String,
    pub model: String,
    pub content: Vec<ResponseBlock>,
    pub stop_reason: StopReason,
    pub stop_sequence: Option<String>,
    pub usage: MessagesUsage,
}

impl MessagesResponse {
    /// Concatenate all text blocks.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| match b {
                ResponseBlock::Text { text } => Some(text.as_str()),
                ResponseBlock::ToolUse { .. } => None,
            })
            .collect()
    }

    pub fn tool_use_names(&self) -> Vec<&str> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ResponseBlock::ToolUse { name, .. } => Some(name.as_str()),
                ResponseBlock::Text { .. } => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_in_messages_api_shape() {
        let response = MessagesResponse {
            id: "msg_1".to_string(),
            kind: "message".to_string(),
            role: "assistant".to_string(),
            model: "claude-sonnet-4-5".to_string(),
            content: vec![
                ResponseBlock::Text {
                    text: "Reading.".to_string(),
                },
                ResponseBlock::ToolUse {
                    id: "call_1".to_string(),
                    name: "Read".to_string(),
                    input: json!({"path": "a.rs"}),
                },
            ],
            stop_reason: StopReason::ToolUse,
            stop_sequence: None,
            usage: MessagesUsage {
                input_tokens: 10,
                output_tokens: 3,
            },
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["type"], "message");
        assert_eq!(value["stop_reason"], "tool_use");
        assert_eq!(value["stop_sequence"], serde_json::Value::Null);
        assert_eq!(value["content"][1]["type"], "tool_use");
        assert_eq!(value["usage"]["output_tokens"], 3);
        assert_eq!(response.text_content(), "Reading.");
        assert_eq!(response.tool_use_names(), vec!["Read"]);
    }
}
