//! Axum router configuration with middleware.
//!
//! Routes: `POST /chat`, `GET /health` and the stream management API under
//! `/api/v1/`. Middleware: CORS, tracing.
//!
//! When `AGENTWIRE_WEB_DIR` points at an existing directory, its files are
//! served for every other path, with `index.html` as the fallback.

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([handlers::chat::THREAD_ID_HEADER]);

    let api_routes = Router::new().route(
        "/threads/{thread_id}/streams",
        delete(handlers::stream::cancel_thread_streams),
    );

    let mut router = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if let Ok(web_dir) = std::env::var("AGENTWIRE_WEB_DIR") {
        if std::path::Path::new(&web_dir).is_dir() {
            let index_path = format!("{web_dir}/index.html");
            let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
            router = router.fallback_service(serve_dir);
            tracing::info!(path = %web_dir, "Static web client enabled");
        } else {
            tracing::warn!(path = %web_dir, "AGENTWIRE_WEB_DIR is not a directory, skipping");
        }
    }

    router
}
