//! Recovery turns for tool validation failures.
//!
//! When the backend rejects a turn because the model called an undeclared
//! tool, the relay answers with a proxy-written assistant message instead
//! of an error. The model reads the guidance on its next turn and can
//! correct itself; the session does not die.
//!
//! The convert-or-propagate decision lives in [`resolve`] and depends only
//! on the [`ClassifiedError`](crate::failure::ClassifiedError) variant.

pub mod synthesizer;

pub use synthesizer::{RecoveryResponse, ResponseStamp, guidance_text, resolve, synthesize};
