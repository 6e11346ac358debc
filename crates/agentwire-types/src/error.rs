use thiserror::Error;

/// Errors surfaced by an agent runtime while producing a turn's events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("runtime unavailable: {0}")]
    Unavailable(String),

    #[error("event stream error: {0}")]
    Stream(String),

    #[error("transcript error ({path}): {message}")]
    Transcript { path: String, message: String },
}

/// A runtime event line that could not be decoded.
#[derive(Debug, Error)]
#[error("malformed runtime event: {0}")]
pub struct EventDecodeError(#[from] serde_json::Error);
