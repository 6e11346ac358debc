//! Streaming chat endpoint.
//!
//! POST /chat takes a form-encoded `user_input` and optional `thread_id`,
//! starts a runtime turn and streams the encoded frames back as a
//! `text/plain` body. The body is pulled by the transport, so the runtime is
//! only polled as fast as the client reads.

use std::convert::Infallible;

use axum::Form;
use axum::body::Body;
use axum::extract::State;
use axum::http::header::{self, HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use futures_util::StreamExt;
use serde::Deserialize;
use tracing::Instrument;
use uuid::Uuid;

use agentwire_core::runtime::TurnRequest;
use agentwire_core::stream::{TransducerOptions, transduce_encoded};
use agentwire_observe::attrs;

use crate::http::error::AppError;
use crate::state::AppState;

/// Response header carrying the effective thread token.
pub const THREAD_ID_HEADER: HeaderName = HeaderName::from_static("x-thread-id");

/// Form body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub user_input: String,
    #[serde(default)]
    pub thread_id: Option<String>,
}

/// Use the supplied thread token, or generate one when absent or blank.
fn effective_thread_id(supplied: Option<String>) -> String {
    supplied
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

/// POST /chat - stream one agent turn as protocol frames.
pub async fn chat(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Result<Response, AppError> {
    if form.user_input.trim().is_empty() {
        return Err(AppError::Validation(
            "user_input must not be empty".to_string(),
        ));
    }

    let thread_id = effective_thread_id(form.thread_id);
    let thread_header = HeaderValue::from_str(&thread_id).map_err(|_| {
        AppError::Validation("thread_id contains characters not allowed in a header".to_string())
    })?;

    state.runtime.check()?;

    let (guard, cancel) = state.register_stream(&thread_id);
    let span = tracing::info_span!(
        attrs::SPAN_CHAT_TURN,
        { attrs::THREAD_ID } = %thread_id,
        { attrs::STREAM_ID } = %guard.id(),
        { attrs::RUNTIME_NAME } = state.runtime.name(),
        { attrs::FRAMES_SENT } = tracing::field::Empty
    );
    tracing::info!(parent: &span, input_len = form.user_input.len(), "Chat turn started");

    let events = state
        .runtime
        .stream_turn(TurnRequest::new(thread_id.clone(), form.user_input));
    let options = TransducerOptions::new(thread_id)
        .with_trace_model_input(state.config.stream.trace_model_input)
        .with_sanitizer(state.sanitizer.clone());
    let chunks = transduce_encoded(events, options, cancel);

    let body = async_stream::stream! {
        // Dropped with the body: on completion or client disconnect.
        let _guard = guard;
        let mut chunks = std::pin::pin!(chunks);
        let mut frames = 0u64;

        // Runtime and transducer work happens while the body is polled.
        while let Some(chunk) = chunks.next().instrument(span.clone()).await {
            frames += 1;
            yield Ok::<_, Infallible>(chunk);
        }

        span.record(attrs::FRAMES_SENT, frames);
        tracing::debug!(parent: &span, frames_sent = frames, "Chat turn finished");
    };

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (THREAD_ID_HEADER, thread_header),
        ],
        Body::from_stream(body),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplied_thread_id_is_kept() {
        assert_eq!(effective_thread_id(Some(" abc ".to_string())), "abc");
    }

    #[test]
    fn test_blank_or_missing_thread_id_is_generated() {
        for supplied in [None, Some(String::new()), Some("   ".to_string())] {
            let id = effective_thread_id(supplied);
            assert!(Uuid::parse_str(&id).is_ok(), "not a uuid: {id}");
        }
    }
}
