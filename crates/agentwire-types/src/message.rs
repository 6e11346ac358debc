//! Conversation message types for agentwire.
//!
//! A `Message` is one role-tagged unit of conversation history. Assistant
//! (`ai`) messages may request tool invocations; `tool` messages answer them
//! by call id. Messages are immutable once appended to a history.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in an agent conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Ai,
    Tool,
    System,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Human => write!(f, "human"),
            Role::Ai => write!(f, "ai"),
            Role::Tool => write!(f, "tool"),
            Role::System => write!(f, "system"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Role::Human),
            "ai" => Ok(Role::Ai),
            "tool" => Ok(Role::Tool),
            "system" => Ok(Role::System),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A tool invocation requested by an `ai` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call id, unique within the conversation. Answered by a `tool` message.
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// Invocation arguments.
    #[serde(default)]
    pub args: serde_json::Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            args,
        }
    }
}

/// A single message in an agent conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    /// Input from the end user.
    Human { content: String },

    /// Output of the reasoning model.
    Ai {
        #[serde(default)]
        content: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
        /// Completion signal reported by the model (e.g. "stop", "tool_calls").
        #[serde(default, skip_serializing_if = "Option::is_none")]
        finish_reason: Option<String>,
    },

    /// Result of a tool invocation.
    Tool {
        content: String,
        /// Id of the `ToolCall` this message answers.
        tool_call_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    /// Instructions for the model. Stale copies are dropped before each turn.
    System { content: String },
}

impl Message {
    pub fn human(content: impl Into<String>) -> Self {
        Message::Human {
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Message::System {
            content: content.into(),
        }
    }

    /// Plain `ai` message without tool calls or completion signal.
    pub fn ai(content: impl Into<String>) -> Self {
        Message::Ai {
            content: content.into(),
            tool_calls: Vec::new(),
            finish_reason: None,
        }
    }

    /// `ai` message that ended the turn (`finish_reason = "stop"`).
    pub fn ai_stop(content: impl Into<String>) -> Self {
        Message::Ai {
            content: content.into(),
            tool_calls: Vec::new(),
            finish_reason: Some("stop".to_string()),
        }
    }

    /// `ai` message requesting one or more tool invocations.
    pub fn ai_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Message::Ai {
            content: String::new(),
            tool_calls,
            finish_reason: Some("tool_calls".to_string()),
        }
    }

    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Message::Tool {
            content: content.into(),
            tool_call_id: tool_call_id.into(),
            name: None,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Message::Human { .. } => Role::Human,
            Message::Ai { .. } => Role::Ai,
            Message::Tool { .. } => Role::Tool,
            Message::System { .. } => Role::System,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Message::Human { content }
            | Message::Ai { content, .. }
            | Message::Tool { content, .. }
            | Message::System { content } => content,
        }
    }

    /// Tool calls requested by this message. Empty for non-`ai` messages.
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Message::Ai { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }

    /// True for an `ai` message carrying at least one tool call.
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls().is_empty()
    }

    pub fn is_tool(&self) -> bool {
        matches!(self, Message::Tool { .. })
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Message::System { .. })
    }

    /// Call id answered by a `tool` message.
    pub fn tool_call_id(&self) -> Option<&str> {
        match self {
            Message::Tool { tool_call_id, .. } => Some(tool_call_id),
            _ => None,
        }
    }

    pub fn finish_reason(&self) -> Option<&str> {
        match self {
            Message::Ai { finish_reason, .. } => finish_reason.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Human, Role::Ai, Role::Tool, Role::System] {
            let s = role.to_string();
            let parsed: Role = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_role_from_str_rejects_unknown() {
        let err = "assistant".parse::<Role>().unwrap_err();
        assert!(err.contains("assistant"));
    }

    #[test]
    fn test_message_tagged_json() {
        let msg = Message::tool("call_1", "7");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({"type": "tool", "content": "7", "tool_call_id": "call_1"})
        );
    }

    #[test]
    fn test_ai_message_defaults_when_fields_absent() {
        let msg: Message = serde_json::from_value(json!({"type": "ai"})).unwrap();
        assert_eq!(msg.role(), Role::Ai);
        assert_eq!(msg.content(), "");
        assert!(!msg.has_tool_calls());
        assert!(msg.finish_reason().is_none());
    }

    #[test]
    fn test_ai_tool_calls_accessors() {
        let msg = Message::ai_tool_calls(vec![ToolCall::new("c1", "add", json!({"a": 3, "b": 4}))]);
        assert!(msg.has_tool_calls());
        assert_eq!(msg.tool_calls()[0].name, "add");
        assert_eq!(msg.finish_reason(), Some("tool_calls"));
        assert!(msg.tool_call_id().is_none());
    }

    #[test]
    fn test_non_ai_messages_have_no_tool_calls() {
        assert!(!Message::human("hi").has_tool_calls());
        assert!(!Message::tool("c1", "ok").has_tool_calls());
        assert!(Message::system("be brief").is_system());
        assert_eq!(Message::tool("c1", "ok").tool_call_id(), Some("c1"));
    }
}
