//! Backend wire types (OpenAI-compatible Chat Completions shape).
//!
//! - [`request`] - [`TranslatedRequest`], the body sent downstream
//! - [`response`] - [`ChatCompletion`], the envelope the backend returns
//!   and the envelope recovery turns are synthesized in

pub mod request;
pub mod response;

pub use request::{
    BackendToolChoice, ChatMessage, ContentPart, FunctionCall, ImageUrl, ToolCall,
    TranslatedRequest, UserContent,
};
pub use response::{AssistantMessage, ChatCompletion, Choice, FinishReason, Usage};
