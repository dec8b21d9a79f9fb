//! Short URL route configuration.

use crate::api::handlers::{redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes mounted under `/url`.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create (or reuse) a short URL
/// - `GET  /{short_code}`  - Redirect to the original URL
///
/// `shorten` is not a valid 8-character code, so the literal route never
/// shadows a real mapping.
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/{short_code}", get(redirect_handler))
}
