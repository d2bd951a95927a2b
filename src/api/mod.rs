//! HTTP surface of the extraction service.

pub mod handlers;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use handlers::AppState;

/// Build the HTTP routes for the service.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_content_size;

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Extraction
        .route("/extractors", get(handlers::list_extractors))
        .route("/extract", post(handlers::extract))
        // State
        .with_state(state)
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
