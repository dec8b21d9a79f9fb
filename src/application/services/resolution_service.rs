//! Short code resolution service.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::run_within;
use crate::domain::clock::Clock;
use crate::domain::entities::UrlMapping;
use crate::domain::expiry::remaining_seconds;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, DEFAULT_CACHE_TTL_SECONDS};
use crate::utils::code_generator::is_valid_code;

/// Message for a code that was never created (or has been purged).
pub const NOT_FOUND_MESSAGE: &str = "Short URL not found.";

/// Message for a code whose mapping has expired.
pub const EXPIRED_MESSAGE: &str = "Short URL has expired.";

/// Resolves short codes to original URLs through a cache-aside read path.
///
/// # Cache Strategy
///
/// - **Hit**: return immediately, no store access and no expiry re-check
/// - **Miss**: query the store, apply the expiry policy, populate the cache
/// - **Read error**: log and fall back to the store
///
/// Entries are written with `min(cache_ttl, remaining lifetime)`, so a cached
/// URL never survives its mapping's expiry and the hit path stays correct
/// without consulting the clock.
pub struct ResolutionService {
    repository: Arc<dyn MappingRepository>,
    cache: Arc<dyn CacheService>,
    clock: Arc<dyn Clock>,
    cache_ttl_seconds: u64,
}

impl ResolutionService {
    /// Creates a resolution service with the default 30 minute cache TTL.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        cache: Arc<dyn CacheService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            cache,
            clock,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
        }
    }

    pub fn with_cache_ttl(mut self, cache_ttl_seconds: u64) -> Self {
        self.cache_ttl_seconds = cache_ttl_seconds;
        self
    }

    /// Resolves a short code to its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] with [`NOT_FOUND_MESSAGE`] if the code is
    /// unknown, or [`EXPIRED_MESSAGE`] if its mapping has expired. Neither
    /// outcome is cached. Store failures propagate as [`AppError::Unavailable`]
    /// or [`AppError::Internal`].
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        if !is_valid_code(short_code) {
            debug!("Rejecting malformed short code {:?}", short_code);
            return Err(AppError::not_found(NOT_FOUND_MESSAGE));
        }

        match self.cache.get_url(short_code).await {
            Ok(Some(url)) => {
                debug!("Cache HIT for {}", short_code);
                metrics::counter!("shortlink_cache_hits_total").increment(1);
                return Ok(url);
            }
            Ok(None) => {
                debug!("Cache MISS for {}", short_code);
                metrics::counter!("shortlink_cache_misses_total").increment(1);
            }
            Err(e) => {
                warn!("Cache read failed for {}: {}. Falling back to store", short_code, e);
                metrics::counter!("shortlink_cache_misses_total").increment(1);
            }
        }

        let mapping = self
            .repository
            .find_by_short_code(short_code)
            .await?
            .ok_or_else(|| {
                warn!("Short code {} not found in store", short_code);
                AppError::not_found(NOT_FOUND_MESSAGE)
            })?;

        let now = self.clock.now();
        if mapping.is_expired_at(now) {
            warn!(
                "Short code {} expired at {:?}",
                short_code, mapping.expires_at
            );
            return Err(AppError::not_found(EXPIRED_MESSAGE));
        }

        self.populate(&mapping, now).await;

        info!(
            "Resolved short code {} to {}",
            short_code, mapping.original_url
        );
        Ok(mapping.original_url)
    }

    /// Like [`Self::resolve`], but gives up once `timeout` has elapsed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] when the deadline passes.
    pub async fn resolve_within(
        &self,
        short_code: &str,
        timeout: Duration,
    ) -> Result<String, AppError> {
        run_within(timeout, self.resolve(short_code)).await
    }

    /// TTL to cache a live mapping with, or `None` if it should not be cached.
    pub fn cache_ttl_for(&self, mapping: &UrlMapping, now: DateTime<Utc>) -> Option<u64> {
        match remaining_seconds(mapping.expires_at, now) {
            None => Some(self.cache_ttl_seconds),
            Some(0) => None,
            Some(remaining) => Some(remaining.min(self.cache_ttl_seconds)),
        }
    }

    async fn populate(&self, mapping: &UrlMapping, now: DateTime<Utc>) {
        let Some(ttl) = self.cache_ttl_for(mapping, now) else {
            debug!(
                "Not caching {}: expires in under a second",
                mapping.short_code
            );
            return;
        };

        if let Err(e) = self
            .cache
            .set_url(&mapping.short_code, &mapping.original_url, Some(ttl))
            .await
        {
            warn!("Failed to cache {}: {}", mapping.short_code, e);
        }
    }
}
