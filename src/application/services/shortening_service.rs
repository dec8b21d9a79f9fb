//! Short link creation service.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use super::run_within;
use crate::domain::clock::Clock;
use crate::domain::entities::{
    NewUrlMapping, ShortenRequest, ShortenResult, ShortenStatus, UrlMapping,
};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::CodeGenerator;

/// Message returned when a new mapping was inserted.
pub const CREATED_MESSAGE: &str = "New short URL created successfully";

/// Message returned for an existing mapping without expiry.
pub const EXISTS_NO_EXPIRY_MESSAGE: &str =
    "Short URL already exists and does not have an expiry date.";

/// Default number of candidate codes tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Path segment between the base URL and the short code.
pub const SHORT_URL_PATH: &str = "/url/";

/// Service for creating short links.
///
/// Deduplicates by original URL, replaces expired mappings, and generates
/// codes under a uniqueness constraint enforced by the store.
pub struct ShorteningService {
    repository: Arc<dyn MappingRepository>,
    cache: Arc<dyn CacheService>,
    codes: Arc<dyn CodeGenerator>,
    clock: Arc<dyn Clock>,
    base_url: String,
    max_attempts: usize,
}

impl ShorteningService {
    /// Creates a new shortening service.
    ///
    /// `base_url` is the public origin short URLs are built from; a trailing
    /// slash is ignored.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        cache: Arc<dyn CacheService>,
        codes: Arc<dyn CodeGenerator>,
        clock: Arc<dyn Clock>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            cache,
            codes,
            clock,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides how many candidate codes are tried per request.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Shortens `request.original_url`, reusing a live mapping when one exists.
    ///
    /// # Flow
    ///
    /// 1. Look up a mapping for the original URL
    /// 2. Live mapping found: return it unchanged
    /// 3. Expired mapping found: delete it, drop its cache entry, continue
    /// 4. Generate a code not present in the store
    /// 5. Insert the new mapping; an insert conflict goes back to step 4
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Exhausted`] if every attempt collided, and
    /// propagates store failures ([`AppError::Unavailable`], [`AppError::Internal`]).
    pub async fn shorten(&self, request: ShortenRequest) -> Result<ShortenResult, AppError> {
        let now = self.clock.now();

        if let Some(existing) = self
            .repository
            .find_by_original_url(&request.original_url)
            .await?
        {
            if !existing.is_expired_at(now) {
                debug!(
                    "Reusing short code {} for {}",
                    existing.short_code, existing.original_url
                );
                return Ok(self.existing_result(existing));
            }

            info!(
                "Short code {} for {} expired at {:?}, replacing",
                existing.short_code, existing.original_url, existing.expires_at
            );
            self.repository.delete(&existing).await?;
            self.evict(&existing.short_code).await;
        }

        let mapping = self.create_mapping(request, now).await?;
        metrics::counter!("shortlink_mappings_created_total").increment(1);
        info!(
            "Created short code {} for {}",
            mapping.short_code, mapping.original_url
        );

        Ok(ShortenResult {
            short_url: self.short_url(&mapping.short_code),
            short_code: mapping.short_code,
            original_url: mapping.original_url,
            message: CREATED_MESSAGE.to_string(),
            expires_at: mapping.expires_at,
            status: ShortenStatus::Created,
        })
    }

    /// Like [`Self::shorten`], but gives up once `timeout` has elapsed.
    ///
    /// The retry loop stops at its next store call. An insert already sent
    /// may still land; the resulting mapping is valid, just unreported.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] when the deadline passes, otherwise as
    /// [`Self::shorten`].
    pub async fn shorten_within(
        &self,
        request: ShortenRequest,
        timeout: Duration,
    ) -> Result<ShortenResult, AppError> {
        run_within(timeout, self.shorten(request)).await
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}{}{}", self.base_url, SHORT_URL_PATH, short_code)
    }

    /// Generates a free code and inserts the mapping under it.
    ///
    /// Every attempt draws a fresh code and re-checks the store; a code that
    /// lost an insert race is never retried.
    async fn create_mapping(
        &self,
        request: ShortenRequest,
        now: DateTime<Utc>,
    ) -> Result<UrlMapping, AppError> {
        for attempt in 1..=self.max_attempts {
            let short_code = self.codes.generate();

            if self
                .repository
                .find_by_short_code(&short_code)
                .await?
                .is_some()
            {
                debug!(attempt, "Short code {} already taken", short_code);
                metrics::counter!("shortlink_code_collisions_total").increment(1);
                continue;
            }

            let new_mapping = NewUrlMapping {
                short_code,
                original_url: request.original_url.clone(),
                created_at: now,
                expires_at: request.expires_at,
            };

            match self.repository.insert(new_mapping).await {
                Ok(mapping) => return Ok(mapping),
                Err(AppError::Conflict { message }) => {
                    warn!(attempt, "Short code lost an insert race: {}", message);
                    metrics::counter!("shortlink_code_collisions_total").increment(1);
                }
                Err(e) => return Err(e),
            }
        }

        error!(
            "Failed to generate a unique short code after {} attempts",
            self.max_attempts
        );
        Err(AppError::exhausted(format!(
            "Failed to generate a unique short code after {} attempts",
            self.max_attempts
        )))
    }

    fn existing_result(&self, mapping: UrlMapping) -> ShortenResult {
        ShortenResult {
            short_url: self.short_url(&mapping.short_code),
            message: existing_message(mapping.expires_at),
            short_code: mapping.short_code,
            original_url: mapping.original_url,
            expires_at: mapping.expires_at,
            status: ShortenStatus::Existing,
        }
    }

    /// Drops the cached resolution of a deleted mapping.
    ///
    /// A failure here is not fatal: cached entries never outlive their
    /// mapping's expiry (see the resolution service's TTL cap).
    async fn evict(&self, short_code: &str) {
        if let Err(e) = self.cache.invalidate(short_code).await {
            warn!("Failed to invalidate cache for {}: {}", short_code, e);
        }
    }
}

/// Message for a shorten call that hit a live mapping.
pub fn existing_message(expires_at: Option<DateTime<Utc>>) -> String {
    match expires_at {
        Some(expires_at) => format!(
            "Short URL already exists and is valid until {}",
            expires_at.format("%Y-%m-%d %H:%M")
        ),
        None => EXISTS_NO_EXPIRY_MESSAGE.to_string(),
    }
}
