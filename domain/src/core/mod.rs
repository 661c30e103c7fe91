//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`] - request translation errors
//! - [`tokens`] - character-based token estimation

pub mod error;
pub mod tokens;
