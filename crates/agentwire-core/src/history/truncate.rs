//! Bounded history truncation that never splits a tool-call group.
//!
//! Cutting a fixed-size suffix off a conversation can separate an `ai`
//! message's tool calls from the `tool` messages answering them, which LLM
//! APIs reject. Truncation walks backward just far enough to restore the one
//! group severed at the cut.

use agentwire_types::message::Message;

/// Truncate `messages` to roughly the last `max` entries.
///
/// System messages are always dropped (the caller prepends a fresh one).
/// The result exceeds `max` only by the size of a single repaired
/// call/result group. A `tool` message whose owning `ai` message is nowhere
/// in the preceding history is left in place.
pub fn truncate_history(messages: &[Message], max: usize) -> Vec<Message> {
    let messages: Vec<&Message> = messages.iter().filter(|m| !m.is_system()).collect();

    if messages.len() <= max {
        return messages.into_iter().cloned().collect();
    }
    if max == 0 {
        return Vec::new();
    }

    let start = messages.len() - max;
    let window = &messages[start..];

    if window[0].is_tool() {
        // Nearest preceding ai message that issued tool calls owns the
        // leading tool results.
        if let Some(owner) = (0..start).rev().find(|&i| messages[i].has_tool_calls()) {
            let excluded_results = messages[owner + 1..start]
                .iter()
                .take_while(|m| m.is_tool())
                .count();

            return messages[owner..=owner + excluded_results]
                .iter()
                .chain(window)
                .map(|m| (*m).clone())
                .collect();
        }
    } else if messages[start - 1].has_tool_calls() {
        // The window opens with this message's results (or right after it).
        return std::iter::once(messages[start - 1])
            .chain(window.iter().copied())
            .cloned()
            .collect();
    }

    window.iter().map(|m| (*m).clone()).collect()
}

/// True when the first non-system message is a `tool` result, i.e. its
/// owning `ai` message is not part of the slice.
pub fn has_leading_orphan(messages: &[Message]) -> bool {
    let Some(first) = messages.iter().find(|m| !m.is_system()) else {
        return false;
    };
    first.is_tool()
}
