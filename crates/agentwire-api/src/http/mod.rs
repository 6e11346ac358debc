//! HTTP layer for agentwire.
//!
//! Axum router exposing the streaming chat endpoint, stream cancellation
//! under `/api/v1/`, and a health check.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
