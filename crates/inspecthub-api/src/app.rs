//! Application builder: wires router, middleware, and state into an Axum app.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.storage.max_upload_size_bytes)
        .unwrap_or(usize::MAX);
    let cors = build_cors_layer(&state.config.server.cors);

    build_router()
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
