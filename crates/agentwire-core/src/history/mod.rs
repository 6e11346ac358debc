//! Conversation history helpers used by the reasoning step before each turn.

pub mod input;
pub mod truncate;

pub use input::{DEFAULT_MAX_HISTORY, prepare_model_input};
pub use truncate::{has_leading_orphan, truncate_history};
