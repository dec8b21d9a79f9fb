//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// System-wide default TTL for cached resolutions (30 minutes).
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 30 * 60;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching short code to URL resolutions.
///
/// Only successful resolutions are ever stored; not-found and expired outcomes
/// are never cached. Implementations must be thread-safe. Callers treat the
/// cache as advisory: a failed read degrades to a store lookup and a failed
/// write is logged and dropped.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::InMemoryCache`] - Process-local TTL cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend cannot be queried.
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a resolution with an optional TTL.
    ///
    /// # Arguments
    ///
    /// - `short_code` - The short code key
    /// - `original_url` - The full URL to cache
    /// - `ttl_seconds` - TTL in seconds; the backend default applies when `None`
    async fn set_url(
        &self,
        short_code: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a cached resolution.
    ///
    /// Used when a mapping is deleted or replaced.
    async fn invalidate(&self, short_code: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for health reporting.
    fn backend(&self) -> &'static str;
}
