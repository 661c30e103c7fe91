//! Use cases (application business logic)

pub mod count_tokens;
pub mod intercept_web_search;
pub mod probe_backend;
pub mod relay_message;
