//! Tool domain module
//!
//! Tool declarations arrive per request and leave per request. Nothing in
//! this module is shared between requests: a [`ToolSet`] is built from one
//! inbound declaration list and is discarded when that request completes.
//!
//! ```text
//! inbound tools[] ──▶ ToolSet::from_declarations ──▶ TranslatedRequest.tools
//!   (may contain        (empty names rejected,         (same names, same
//!    duplicates)         exact duplicates collapsed)     order, nothing added)
//! ```
//!
//! # Identity
//!
//! A tool's name is its only identity key and is compared case-sensitively.
//! `"LS"` and `"Ls"` are two different tools, because the backend validates
//! tool calls byte-for-byte against the declared names.
//!
//! # Key Types
//!
//! - [`ToolDescriptor`] - one declared tool (name + opaque parameter schema)
//! - [`ToolSet`] - ordered, name-unique collection scoped to one request

pub mod tool_set;

pub use tool_set::{ToolDescriptor, ToolSet};
