//! Span and event field names used across agentwire.
//!
//! Usable as field names in `tracing::info_span!` so every crate reports
//! streams and runtimes under the same keys.

/// Conversation token supplied by (or generated for) the client.
pub const THREAD_ID: &str = "agentwire.thread.id";

/// Per-stream id assigned by the HTTP boundary.
pub const STREAM_ID: &str = "agentwire.stream.id";

/// Name of the agent runtime backing the stream (e.g. "echo").
pub const RUNTIME_NAME: &str = "agentwire.runtime.name";

/// Number of frames written to the client when a stream ends.
pub const FRAMES_SENT: &str = "agentwire.stream.frames";

// --- Span names ---

/// One streamed chat turn.
pub const SPAN_CHAT_TURN: &str = "chat_turn";

/// An offline transcript replay.
pub const SPAN_REPLAY: &str = "replay";
