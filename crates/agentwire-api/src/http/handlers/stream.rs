//! Cancellation of in-flight chat streams.

use std::time::Instant;

use axum::extract::{Path, State};
use serde::Serialize;

use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CancelledStreams {
    pub thread_id: String,
    pub cancelled: usize,
}

/// DELETE /api/v1/threads/{thread_id}/streams
///
/// Streams end without a final answer once their token fires.
pub async fn cancel_thread_streams(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> ApiResponse<CancelledStreams> {
    let start = Instant::now();
    let cancelled = state.cancel_thread_streams(&thread_id);
    tracing::info!(thread_id = %thread_id, cancelled, "Cancel requested");

    ApiResponse::success(
        CancelledStreams {
            thread_id,
            cancelled,
        },
        start.elapsed().as_millis() as u64,
    )
}
