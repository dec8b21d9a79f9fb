//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenUrlRequest, ShortenUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL, or returns the live one.
///
/// # Endpoint
///
/// `POST /url/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "expiresAt": "2030-12-31T23:59:59"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "shortUrl": "http://localhost:8080/url/Ab3dEf7h",
///   "originalUrl": "https://example.com",
///   "message": "New short URL created successfully",
///   "expiredAt": "2030-12-31T23:59:59Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an unreadable body, an empty URL or a URL
/// without an http(s) scheme. Store failures map to 500/503.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenUrlRequest>, JsonRejection>,
) -> Result<Json<ShortenUrlResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;

    payload.validate()?;

    let result = state
        .shortening_service
        .shorten_within(payload.into(), state.request_timeout)
        .await?;

    Ok(Json(result.into()))
}
