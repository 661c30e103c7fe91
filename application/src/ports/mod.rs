//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod completion_backend;
pub mod relay_logger;
pub mod web_search;
