//! Pure translation between the client's and the backend's wire shapes.
//!
//! ```text
//! MessagesRequest ──▶ RequestNormalizer ──▶ TranslatedRequest ──▶ backend
//! MessagesResponse ◀── to_messages_response ◀── ChatCompletion ◀──┘
//!                                                (real or recovery)
//! ```
//!
//! Translation never adds, removes, or renames a declared tool.

pub mod model_map;
pub mod request;
pub mod response;

pub use model_map::ModelMap;
pub use request::RequestNormalizer;
pub use response::to_messages_response;
