//! Debug logging of the message window sent to the reasoning step.

use agentwire_types::message::Message;

const PREVIEW_CHARS: usize = 50;

/// One-line preview of a message: whitespace collapsed, first 50 characters.
pub fn preview(message: &Message) -> String {
    let collapsed = message.content().split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return "N/A".to_string();
    }
    collapsed.chars().take(PREVIEW_CHARS).collect()
}

/// Render the input window as numbered lines, one per message.
pub fn describe_window(messages: &[Message]) -> Vec<String> {
    messages
        .iter()
        .enumerate()
        .map(|(i, msg)| {
            let mut line = format!("{:>2}. {:<6} {}", i + 1, msg.role().to_string(), preview(msg));
            if msg.has_tool_calls() {
                line.push_str(&format!(" [tool_calls: {}]", msg.tool_calls().len()));
            }
            line
        })
        .collect()
}

pub(crate) fn log_model_input(thread_id: &str, run_id: &str, input: &[Message]) {
    tracing::info!(
        thread_id = %thread_id,
        run_id = %run_id,
        messages = input.len(),
        "Model input window"
    );
    for line in describe_window(input) {
        tracing::info!(run_id = %run_id, "  {line}");
    }
}
