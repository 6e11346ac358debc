//! Runtime lifecycle events consumed by the stream transducer.
//!
//! `RuntimeEvent` is the tagged union of everything an agent runtime emits
//! during one turn. Each variant carries only the payload relevant to its
//! kind. Events are serialized as JSON objects tagged by `"kind"`; transcript
//! files hold one event per line.

use serde::{Deserialize, Serialize};

use crate::error::EventDecodeError;
use crate::message::Message;

fn default_tool_name() -> String {
    "tool".to_string()
}

/// Model input windows arrive either flat or wrapped in one extra list
/// (one window per prompt in a batch). Only single-window batches are
/// unwrapped.
fn model_input<'de, D>(deserializer: D) -> Result<Vec<Message>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Window {
        Flat(Vec<Message>),
        Batched(Vec<Vec<Message>>),
    }

    match Window::deserialize(deserializer)? {
        Window::Flat(messages) => Ok(messages),
        Window::Batched(mut batch) if batch.len() == 1 => Ok(batch.remove(0)),
        Window::Batched(batch) => Ok(batch.into_iter().flatten().collect()),
    }
}

/// One lifecycle notification emitted by the agent runtime.
///
/// `run_id` is opaque and stable across the start/end pair of one operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RuntimeEvent {
    /// The reasoning model was invoked with `input` as its message window.
    ModelStart {
        run_id: String,
        #[serde(default)]
        name: String,
        #[serde(default, deserialize_with = "model_input")]
        input: Vec<Message>,
    },

    /// A streamed text delta from the reasoning model.
    Token {
        run_id: String,
        #[serde(default)]
        name: String,
        #[serde(default)]
        text: String,
    },

    /// A tool invocation started.
    ToolStart {
        run_id: String,
        #[serde(default = "default_tool_name")]
        name: String,
        #[serde(default)]
        input: serde_json::Value,
    },

    /// A tool invocation returned.
    ToolEnd {
        run_id: String,
        #[serde(default = "default_tool_name")]
        name: String,
        #[serde(default)]
        output: ToolOutput,
    },

    /// A chain (graph or graph node) completed with `output` messages.
    ChainEnd {
        run_id: String,
        #[serde(default)]
        name: String,
        /// True for completions of inner graph nodes rather than the whole turn.
        #[serde(default)]
        nested: bool,
        #[serde(default)]
        output: Vec<Message>,
    },

    /// An event kind this adapter does not understand yet.
    #[serde(other)]
    Unknown,
}

impl RuntimeEvent {
    /// Decode one JSON transcript line.
    pub fn from_json_line(line: &str) -> Result<Self, EventDecodeError> {
        serde_json::from_str(line.trim()).map_err(EventDecodeError::from)
    }

    /// Returns the run id for recognized kinds, or None for `Unknown`.
    pub fn run_id(&self) -> Option<&str> {
        match self {
            RuntimeEvent::ModelStart { run_id, .. }
            | RuntimeEvent::Token { run_id, .. }
            | RuntimeEvent::ToolStart { run_id, .. }
            | RuntimeEvent::ToolEnd { run_id, .. }
            | RuntimeEvent::ChainEnd { run_id, .. } => Some(run_id),
            RuntimeEvent::Unknown => None,
        }
    }

    /// Stable kind label, as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            RuntimeEvent::ModelStart { .. } => "model-start",
            RuntimeEvent::Token { .. } => "token",
            RuntimeEvent::ToolStart { .. } => "tool-start",
            RuntimeEvent::ToolEnd { .. } => "tool-end",
            RuntimeEvent::ChainEnd { .. } => "chain-end",
            RuntimeEvent::Unknown => "unknown",
        }
    }
}

/// Return value of a tool invocation, as reported by the runtime.
///
/// Only objects tagged `"type": "tool"` are unwrapped as messages; any other
/// JSON value is kept whole.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    /// The runtime wrapped the result in a `tool` message.
    Message(Message),
    /// Raw string output.
    Text(String),
    /// Any other JSON value.
    Json(serde_json::Value),
}

impl Default for ToolOutput {
    fn default() -> Self {
        ToolOutput::Text(String::new())
    }
}

impl ToolOutput {
    /// Flatten the output to the raw text handed to the sanitizer.
    ///
    /// Message outputs contribute their content; JSON values are rendered
    /// compactly.
    pub fn to_text(&self) -> String {
        match self {
            ToolOutput::Message(msg) => msg.content().to_string(),
            ToolOutput::Text(text) => text.clone(),
            ToolOutput::Json(value) => value.to_string(),
        }
    }
}

impl From<serde_json::Value> for ToolOutput {
    fn from(value: serde_json::Value) -> Self {
        if value.get("type").and_then(serde_json::Value::as_str) == Some("tool") {
            if let Ok(msg @ Message::Tool { .. }) = serde_json::from_value::<Message>(value.clone()) {
                return ToolOutput::Message(msg);
            }
        }
        match value {
            serde_json::Value::String(text) => ToolOutput::Text(text),
            other => ToolOutput::Json(other),
        }
    }
}

impl<'de> Deserialize<'de> for ToolOutput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(ToolOutput::from)
    }
}

impl From<&str> for ToolOutput {
    fn from(value: &str) -> Self {
        ToolOutput::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_tool_start_line() {
        let line = r#"{"kind":"tool-start","run_id":"r1","name":"add","input":{"a":3,"b":4}}"#;
        let event = RuntimeEvent::from_json_line(line).unwrap();
        assert_eq!(
            event,
            RuntimeEvent::ToolStart {
                run_id: "r1".to_string(),
                name: "add".to_string(),
                input: json!({"a": 3, "b": 4}),
            }
        );
        assert_eq!(event.kind(), "tool-start");
        assert_eq!(event.run_id(), Some("r1"));
    }

    #[test]
    fn test_unknown_kind_decodes_to_unknown() {
        let event = RuntimeEvent::from_json_line(r#"{"kind":"retriever-start","run_id":"x"}"#).unwrap();
        assert_eq!(event, RuntimeEvent::Unknown);
        assert!(event.run_id().is_none());
    }

    #[test]
    fn test_malformed_line_is_decode_error() {
        assert!(RuntimeEvent::from_json_line("{not json").is_err());
        // Known kind missing its run id
        assert!(RuntimeEvent::from_json_line(r#"{"kind":"token","text":"hi"}"#).is_err());
    }

    #[test]
    fn test_tool_name_defaults_to_tool() {
        let event = RuntimeEvent::from_json_line(r#"{"kind":"tool-end","run_id":"r1","output":"7"}"#).unwrap();
        match event {
            RuntimeEvent::ToolEnd { name, output, .. } => {
                assert_eq!(name, "tool");
                assert_eq!(output, ToolOutput::Text("7".to_string()));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_tool_output_variants_to_text() {
        let wrapped: ToolOutput =
            serde_json::from_value(json!({"type": "tool", "content": "42", "tool_call_id": "c1"}))
                .unwrap();
        assert_eq!(wrapped.to_text(), "42");

        let json_out: ToolOutput = serde_json::from_value(json!({"rows": [1, 2]})).unwrap();
        assert_eq!(json_out.to_text(), r#"{"rows":[1,2]}"#);

        let number: ToolOutput = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(number.to_text(), "7");
    }

    #[test]
    fn test_non_tool_message_shaped_output_keeps_all_fields() {
        let value = json!({"type": "system", "content": "x", "rows": [1, 2, 3]});
        let output: ToolOutput = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(output, ToolOutput::Json(value));
        assert_eq!(output.to_text(), r#"{"type":"system","content":"x","rows":[1,2,3]}"#);

        // A tool-tagged object missing its call id is not a tool message either.
        let partial: ToolOutput =
            serde_json::from_value(json!({"type": "tool", "content": "x"})).unwrap();
        assert!(matches!(partial, ToolOutput::Json(_)));
    }

    #[test]
    fn test_tool_end_line_keeps_structured_output() {
        let line = r#"{"kind":"tool-end","run_id":"r1","output":{"type":"ai","content":"hi","extra":true}}"#;
        match RuntimeEvent::from_json_line(line).unwrap() {
            RuntimeEvent::ToolEnd { output, .. } => {
                assert!(output.to_text().contains(r#""extra":true"#));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_model_start_unwraps_single_window_batch() {
        let line = r#"{"kind":"model-start","run_id":"m1","input":[[{"type":"human","content":"hi"}]]}"#;
        match RuntimeEvent::from_json_line(line).unwrap() {
            RuntimeEvent::ModelStart { input, .. } => {
                assert_eq!(input, vec![Message::human("hi")]);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        let flat = r#"{"kind":"model-start","run_id":"m1","input":[{"type":"human","content":"hi"}]}"#;
        match RuntimeEvent::from_json_line(flat).unwrap() {
            RuntimeEvent::ModelStart { input, .. } => assert_eq!(input.len(), 1),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_chain_end_nested_defaults_false() {
        let line = r#"{"kind":"chain-end","run_id":"g","output":[{"type":"ai","content":"42","finish_reason":"stop"}]}"#;
        match RuntimeEvent::from_json_line(line).unwrap() {
            RuntimeEvent::ChainEnd { nested, output, .. } => {
                assert!(!nested);
                assert_eq!(output.len(), 1);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
