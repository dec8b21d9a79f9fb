//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /url/shorten`       - Create a short URL
//! - `GET  /url/{short_code}`  - Redirect to the original URL
//! - `GET  /health`            - Health check: store and cache
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// All routes bound to `state`, without middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/url", api::routes::url_routes())
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = router(state).layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
