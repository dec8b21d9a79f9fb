//! Repository trait for URL mapping persistence.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persistence port for URL mappings.
///
/// A narrow contract over the durable store: lookups by both keys, insert and
/// delete. No caching and no business rules belong here.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - in-memory fake
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Finds a mapping by its original URL.
    ///
    /// `original_url` carries no uniqueness constraint, so concurrent first-time
    /// shortens can leave several rows behind. The most recently created one is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] when the store cannot be reached and
    /// [`AppError::Internal`] on other database errors.
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError>;

    /// Finds a mapping by its short code, expired or not.
    ///
    /// # Errors
    ///
    /// Same as [`Self::find_by_original_url`].
    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Inserts a mapping and assigns its identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken. The
    /// check is enforced by the store itself, not by a prior lookup.
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Deletes a mapping. Deleting an absent mapping is a no-op.
    async fn delete(&self, mapping: &UrlMapping) -> Result<(), AppError>;

    /// Deletes every mapping whose expiry lies strictly before `now`.
    ///
    /// Returns the number of rows removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;

    /// Counts stored mappings, expired ones included.
    async fn count(&self) -> Result<i64, AppError>;

    /// Checks if the store is reachable.
    async fn health_check(&self) -> bool;
}
