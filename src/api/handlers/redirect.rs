//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /url/{short_code}`
///
/// Resolution goes through the cache first; see
/// [`ResolutionService`](crate::application::services::ResolutionService).
///
/// # Errors
///
/// Returns 404 Not Found with `"Short URL not found."` or
/// `"Short URL has expired."`.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state
        .resolution_service
        .resolve_within(&short_code, state.request_timeout)
        .await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]))
}
