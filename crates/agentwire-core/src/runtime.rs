//! AgentRuntime trait definition.
//!
//! The agent runtime (the graph that decides when to call a tool and when to
//! stop) is an external collaborator. This port is the only thing the stream
//! adapter needs from it: one ordered event stream per turn.
//!
//! Implementations live in agentwire-infra (e.g., `EchoRuntime`).

use std::pin::Pin;

use futures_util::Stream;

use agentwire_types::error::RuntimeError;
use agentwire_types::event::RuntimeEvent;

/// Boxed, ordered event stream for one turn.
pub type BoxEventStream =
    Pin<Box<dyn Stream<Item = Result<RuntimeEvent, RuntimeError>> + Send + 'static>>;

/// Input of one agent turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    /// Opaque conversation token; the runtime uses it to find its own state.
    pub thread_id: String,
    /// The user's message for this turn.
    pub user_input: String,
}

impl TurnRequest {
    pub fn new(thread_id: impl Into<String>, user_input: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            user_input: user_input.into(),
        }
    }
}

/// Trait for agent runtime backends.
///
/// Returns a boxed stream (not RPITIT) so runtimes can be selected at startup
/// and held as `Arc<dyn AgentRuntime>`.
pub trait AgentRuntime: Send + Sync {
    /// Human-readable runtime name (e.g., "echo", "replay").
    fn name(&self) -> &str;

    /// Cheap readiness probe run before a turn is started.
    fn check(&self) -> Result<(), RuntimeError> {
        Ok(())
    }

    /// Start a turn. Events must be yielded in emission order; dropping the
    /// stream abandons the turn.
    fn stream_turn(&self, request: TurnRequest) -> BoxEventStream;
}
