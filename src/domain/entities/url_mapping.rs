//! URL mapping entity.

use chrono::{DateTime, Utc};

use crate::domain::expiry::is_expired;

/// A short code mapped to its original URL.
///
/// Mappings are never edited in place. An expired mapping is deleted and a
/// fresh one inserted under a new code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(
        id: i64,
        short_code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            short_code,
            original_url,
            created_at,
            expires_at,
        }
    }

    /// Returns true if the mapping's expiry lies strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.expires_at, now)
    }
}

/// Input data for inserting a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewUrlMapping {
    /// Attaches a store-assigned identity.
    pub fn into_mapping(self, id: i64) -> UrlMapping {
        UrlMapping::new(
            id,
            self.short_code,
            self.original_url,
            self.created_at,
            self.expires_at,
        )
    }
}
