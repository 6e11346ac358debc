//! Health check endpoint.

use axum::Json;
use axum::extract::State;

use crate::state::AppState;

/// GET /health - liveness plus the number of in-flight chat streams.
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "runtime": state.runtime.name(),
        "active_streams": state.active_stream_count(),
    }))
}
