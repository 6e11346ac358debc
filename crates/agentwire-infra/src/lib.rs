//! Infrastructure layer for agentwire.
//!
//! Contains the concrete `AgentRuntime` implementations defined as a port in
//! `agentwire-core`, plus config file loading and data directory resolution.

pub mod config;
pub mod filesystem;
pub mod runtime;
