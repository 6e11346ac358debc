//! Global configuration types for agentwire.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls the
//! HTTP listener, stream adapter behavior and the agent runtime backing the
//! chat endpoint.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.agentwire/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub stream: StreamConfig,

    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8003
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Stream adapter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Maximum number of history messages sent to the reasoning step.
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Log the model input window of every `model-start` event.
    #[serde(default)]
    pub trace_model_input: bool,

    /// Tag prefix of the delimiters wrapping extracted tool payloads.
    #[serde(default = "default_tool_output_tag")]
    pub tool_output_tag: String,
}

fn default_max_history() -> usize {
    40
}

fn default_tool_output_tag() -> String {
    "untrusted-data".to_string()
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            trace_model_input: false,
            tool_output_tag: default_tool_output_tag(),
        }
    }
}

/// Which agent runtime backs the chat endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeKind {
    /// Echo the user input back as a streamed answer.
    #[default]
    Echo,
    /// Replay a recorded JSONL event transcript for every turn.
    Replay,
}

/// Agent runtime settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub kind: RuntimeKind,

    /// Transcript file replayed by the `replay` runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<PathBuf>,

    /// Pause between replayed events, in milliseconds.
    #[serde(default)]
    pub event_delay_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8003);
        assert_eq!(config.stream.max_history, 40);
        assert!(!config.stream.trace_model_input);
        assert_eq!(config.stream.tool_output_tag, "untrusted-data");
        assert_eq!(config.runtime.kind, RuntimeKind::Echo);
        assert!(config.runtime.transcript.is_none());
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8003);
        assert_eq!(config.stream.max_history, 40);
        assert_eq!(config.runtime.event_delay_ms, 0);
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
[server]
port = 9000

[stream]
max_history = 12
trace_model_input = true

[runtime]
kind = "replay"
transcript = "/tmp/turn.jsonl"
event_delay_ms = 25
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.stream.max_history, 12);
        assert!(config.stream.trace_model_input);
        assert_eq!(config.stream.tool_output_tag, "untrusted-data");
        assert_eq!(config.runtime.kind, RuntimeKind::Replay);
        assert_eq!(
            config.runtime.transcript.as_deref(),
            Some(std::path::Path::new("/tmp/turn.jsonl"))
        );
        assert_eq!(config.runtime.event_delay_ms, 25);
    }

    #[test]
    fn test_unknown_runtime_kind_is_rejected() {
        let result = toml::from_str::<GlobalConfig>("[runtime]\nkind = \"graph\"\n");
        assert!(result.is_err());
    }
}
