//! Web search adapters (`web-search` feature).

mod exa;

pub use exa::{EXA_BASE_URL, ExaSearchAdapter};
