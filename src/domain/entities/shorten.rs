//! Input and output of the shortening flow.

use chrono::{DateTime, Utc};

/// A request to shorten `original_url`.
///
/// `expires_at` is taken as given; a timestamp in the past produces a mapping
/// that is already expired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenRequest {
    pub original_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortenRequest {
    pub fn new(original_url: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            original_url: original_url.into(),
            expires_at,
        }
    }
}

/// Which branch of the shortening flow produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortenStatus {
    /// A live mapping for the URL already existed.
    Existing,
    /// A new mapping was inserted.
    Created,
}

/// Outcome of a shorten call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenResult {
    pub short_url: String,
    pub short_code: String,
    pub original_url: String,
    pub message: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub status: ShortenStatus,
}
