//! `awire truncate`: bound a stored conversation the way the reasoning step does.

use std::path::Path;

use agentwire_core::history::{has_leading_orphan, prepare_model_input, truncate_history};
use agentwire_types::message::Message;

/// Truncate the JSON message array in `file` and print it as pretty JSON.
pub async fn truncate(file: &Path, max: usize, system: Option<&str>) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(file).await?;
    println!("{}", truncate_json(&content, max, system)?);
    Ok(())
}

/// Parse, truncate and re-serialize a message array.
///
/// With a system prompt the output is the full model input window.
pub fn truncate_json(content: &str, max: usize, system: Option<&str>) -> anyhow::Result<String> {
    let history: Vec<Message> = serde_json::from_str(content)?;

    let window = match system {
        Some(prompt) => prepare_model_input(prompt, &history, max),
        None => {
            let window = truncate_history(&history, max);
            if has_leading_orphan(&window) {
                tracing::warn!(max, "Truncated history starts with an orphaned tool result");
            }
            window
        }
    };

    tracing::debug!(before = history.len(), after = window.len(), max, "History truncated");
    Ok(serde_json::to_string_pretty(&window)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentwire_types::message::Role;

    const HISTORY: &str = r#"[
        {"type": "system", "content": "old prompt"},
        {"type": "human", "content": "3+4?"},
        {"type": "ai", "content": "", "tool_calls": [{"id": "c1", "name": "add", "args": {"a": 3, "b": 4}}], "finish_reason": "tool_calls"},
        {"type": "tool", "tool_call_id": "c1", "content": "7"},
        {"type": "ai", "content": "7", "finish_reason": "stop"}
    ]"#;

    fn roles(json: &str) -> Vec<Role> {
        let messages: Vec<Message> = serde_json::from_str(json).unwrap();
        messages.iter().map(Message::role).collect()
    }

    #[test]
    fn test_truncation_keeps_tool_group_intact() {
        let out = truncate_json(HISTORY, 2, None).unwrap();
        assert_eq!(roles(&out), vec![Role::Ai, Role::Tool, Role::Ai]);
    }

    #[test]
    fn test_system_prompt_is_prepended() {
        let out = truncate_json(HISTORY, 40, Some("be brief")).unwrap();
        assert_eq!(
            roles(&out),
            vec![Role::System, Role::Human, Role::Ai, Role::Tool, Role::Ai]
        );
        assert!(out.contains("be brief"));
        assert!(!out.contains("old prompt"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(truncate_json("{not an array", 4, None).is_err());
    }
}
