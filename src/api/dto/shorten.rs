//! DTOs for the shortening endpoint.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

use crate::domain::entities::{ShortenRequest, ShortenResult};
use crate::utils::timestamp;

/// An http(s) URL with no control characters anywhere in it.
static HTTP_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\x00-\x1f\x7f]*$").expect("valid regex"));

pub const EMPTY_URL_MESSAGE: &str = "URL cannot be empty";
pub const INVALID_SCHEME_MESSAGE: &str = "URL must start with http:// or https://";

/// Body of `POST /url/shorten`.
///
/// ```json
/// { "originalUrl": "https://example.com", "expiresAt": "2030-12-31T23:59:59" }
/// ```
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenUrlRequest {
    /// Missing, null and empty are reported the same way.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_original_url"))]
    pub original_url: String,

    /// Offset-less timestamps are read as UTC.
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<ShortenUrlRequest> for ShortenRequest {
    fn from(dto: ShortenUrlRequest) -> Self {
        ShortenRequest::new(dto.original_url, dto.expires_at)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn validate_original_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Err(ValidationError::new("empty").with_message(Cow::Borrowed(EMPTY_URL_MESSAGE)));
    }

    if !HTTP_URL_REGEX.is_match(url) {
        return Err(
            ValidationError::new("scheme").with_message(Cow::Borrowed(INVALID_SCHEME_MESSAGE))
        );
    }

    Ok(())
}

/// Response of `POST /url/shorten`.
///
/// `expiredAt` is always present and `null` for mappings without expiry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenUrlResponse {
    pub short_url: String,
    pub original_url: String,
    pub message: String,
    pub expired_at: Option<DateTime<Utc>>,
}

impl From<ShortenResult> for ShortenUrlResponse {
    fn from(result: ShortenResult) -> Self {
        Self {
            short_url: result.short_url,
            original_url: result.original_url,
            message: result.message,
            expired_at: result.expires_at,
        }
    }
}
