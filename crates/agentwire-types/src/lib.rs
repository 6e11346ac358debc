//! Shared domain types for agentwire.
//!
//! This crate contains the types exchanged between the agent runtime, the
//! stream transducer and the HTTP boundary: conversation messages, runtime
//! lifecycle events, protocol frames, configuration and error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod config;
pub mod error;
pub mod event;
pub mod frame;
pub mod message;
