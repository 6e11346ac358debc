//! Core stream adaptation logic for agentwire.
//!
//! This crate turns an agent runtime's lifecycle events into protocol frames
//! and owns the two pure helpers around it: tool output sanitizing and
//! history truncation. It defines the `AgentRuntime` port that concrete
//! runtimes in `agentwire-infra` implement, and depends only on
//! `agentwire-types` -- never on the HTTP boundary.

pub mod history;
pub mod runtime;
pub mod sanitize;
pub mod stream;
