//! Model input preparation for the reasoning step.
//!
//! Builds the message window actually sent to the model: the bounded history
//! with a fresh system prompt in front.

use agentwire_types::message::Message;

use super::truncate::{has_leading_orphan, truncate_history};

/// History bound used when none is configured.
pub const DEFAULT_MAX_HISTORY: usize = 40;

/// Truncate `history` to `max_history` messages and prepend `system_prompt`.
///
/// An orphaned leading `tool` message is a caller data-integrity problem;
/// it is logged and passed through rather than rejected.
pub fn prepare_model_input(
    system_prompt: &str,
    history: &[Message],
    max_history: usize,
) -> Vec<Message> {
    let window = truncate_history(history, max_history);

    if has_leading_orphan(&window) {
        tracing::warn!(
            history_len = history.len(),
            max_history,
            tool_call_id = window.first().and_then(Message::tool_call_id).unwrap_or_default(),
            "Model input starts with a tool result whose call is missing from history"
        );
    }

    let mut input = Vec::with_capacity(window.len() + 1);
    input.push(Message::system(system_prompt));
    input.extend(window);
    input
}
