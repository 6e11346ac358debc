//! Protocol frames emitted to streaming clients.
//!
//! Frames are encoded as plain text chunks. Text deltas carry no marker;
//! every other frame starts on a fresh line with a `__MARKER__:` prefix so
//! a client can split rendered prose from tool activity and the final answer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker prefix of an encoded `ToolCall` frame.
pub const TOOL_CALL_MARKER: &str = "__TOOL_CALL__";
/// Marker prefix of an encoded `ToolResult` frame.
pub const TOOL_RESULT_MARKER: &str = "__TOOL_CALL_RESULT__";
/// Marker prefix of an encoded `Final` frame.
pub const FINAL_MARKER: &str = "__FINAL__";

/// One unit of the outgoing streaming protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame {
    /// Incremental model output.
    TextDelta { content: String },
    /// A tool invocation started.
    ToolCall {
        name: String,
        args: serde_json::Value,
    },
    /// A tool invocation returned (output already sanitized).
    ToolResult { name: String, output: String },
    /// The terminal answer of the turn. At most one per stream, always last.
    Final { content: String },
}

impl Frame {
    /// Encode the frame as the text chunk written to the response body.
    pub fn encode(&self) -> String {
        match self {
            Frame::TextDelta { content } => format!("{content} "),
            Frame::ToolCall { name, args } => {
                format!("\n{TOOL_CALL_MARKER}:Calling tool '{name}' with args {args}\n")
            }
            Frame::ToolResult { name, output } => {
                format!("\n{TOOL_RESULT_MARKER}:Tool '{name}' returned: {output}\n")
            }
            Frame::Final { content } => format!("\n{FINAL_MARKER}:{content}"),
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Frame::Final { .. })
    }

    /// Short kind label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Frame::TextDelta { .. } => "text_delta",
            Frame::ToolCall { .. } => "tool_call",
            Frame::ToolResult { .. } => "tool_result",
            Frame::Final { .. } => "final",
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
