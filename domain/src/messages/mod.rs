//! Client-facing wire types (Anthropic Messages API shape).
//!
//! - [`request`] - the inbound `POST /v1/messages` body
//! - [`response`] - the message envelope returned to the client

pub mod request;
pub mod response;

pub use request::{
    ContentBlock, ImageSource, InboundMessage, MessageContent, MessagesRequest, Role,
    SystemBlock, SystemPrompt, ToolChoice, ToolDeclaration, ToolResultContent,
};
pub use response::{MessagesResponse, MessagesUsage, ResponseBlock, StopReason};
