//! Domain layer for tool-relay
//!
//! This crate contains the wire types and the pure logic of the relay.
//! It performs no I/O and has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Faithful translation
//!
//! An inbound request's tool declarations become a request-scoped
//! [`ToolSet`]: exact duplicates collapse, nothing else changes. The
//! backend receives exactly the tools the orchestrator declared, so a
//! missing tool is visibly the orchestrator's bug rather than the relay's.
//!
//! ## Tool validation recovery
//!
//! The backend rejects any turn in which the model calls an undeclared
//! tool. Such a rejection is classified as a
//! [`ClassifiedError::ToolValidationFailure`] and converted into a
//! [`RecoveryResponse`]: an ordinary assistant turn that tells the model
//! which tools it actually has. Every other failure stays an error.

pub mod completion;
pub mod core;
pub mod failure;
pub mod messages;
pub mod recovery;
pub mod tool;
pub mod translate;

// Re-export commonly used types
pub use completion::{
    AssistantMessage, ChatCompletion, ChatMessage, Choice, FinishReason, ToolCall,
    TranslatedRequest, Usage,
};
pub use crate::core::{error::DomainError, tokens::estimate_tokens};
pub use failure::{
    BackendFailure, ClassifiedError, FailureKind, TIMEOUT_STATUS, TRANSPORT_STATUS,
    ToolValidationMatcher, classify, friendly_message,
};
pub use messages::{
    ContentBlock, InboundMessage, MessageContent, MessagesRequest, MessagesResponse,
    MessagesUsage, ResponseBlock, Role, StopReason, ToolDeclaration, ToolResultContent,
};
pub use recovery::{RecoveryResponse, ResponseStamp, resolve, synthesize};
pub use tool::{ToolDescriptor, ToolSet};
pub use translate::{ModelMap, RequestNormalizer, to_messages_response};
