//! Process-local TTL cache.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct CachedUrl {
    original_url: String,
    expires_at: Instant,
}

/// In-memory cache with per-entry TTL.
///
/// Backed by a sharded `DashMap`, so concurrent reads and writes to different
/// keys do not contend. Expired entries are dropped lazily on read. Uses the
/// tokio clock, which lets tests pause and advance time.
#[derive(Debug)]
pub struct InMemoryCache {
    entries: DashMap<String, CachedUrl>,
    default_ttl: Duration,
}

impl InMemoryCache {
    pub fn new(default_ttl_seconds: u64) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }

    /// Number of entries currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a live entry exists for `short_code`.
    pub fn contains(&self, short_code: &str) -> bool {
        self.entries
            .get(short_code)
            .is_some_and(|entry| entry.expires_at > Instant::now())
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let Some(entry) = self.entries.get(short_code) else {
            return Ok(None);
        };

        if entry.expires_at <= Instant::now() {
            drop(entry);
            self.entries.remove(short_code);
            debug!("Cache entry for {} lapsed", short_code);
            return Ok(None);
        }

        Ok(Some(entry.original_url.clone()))
    }

    async fn set_url(
        &self,
        short_code: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let ttl = ttl_seconds
            .map(Duration::from_secs)
            .unwrap_or(self.default_ttl);

        self.entries.insert(
            short_code.to_string(),
            CachedUrl {
                original_url: original_url.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn invalidate(&self, short_code: &str) -> CacheResult<()> {
        self.entries.remove(short_code);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_set_and_get_within_ttl() {
        let cache = InMemoryCache::new(1800);

        cache
            .set_url("abcDEF12", "https://example.com", None)
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(1799)).await;

        assert_eq!(
            cache.get_url("abcDEF12").await.unwrap().as_deref(),
            Some("https://example.com")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_lapses_after_default_ttl() {
        let cache = InMemoryCache::new(1800);

        cache
            .set_url("abcDEF12", "https://example.com", None)
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(1800)).await;

        assert!(cache.get_url("abcDEF12").await.unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_ttl_overrides_default() {
        let cache = InMemoryCache::new(1800);

        cache
            .set_url("abcDEF12", "https://example.com", Some(5))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(6)).await;

        assert!(!cache.contains("abcDEF12"));
        assert!(cache.get_url("abcDEF12").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalidate_removes_entry() {
        let cache = InMemoryCache::new(1800);

        cache
            .set_url("abcDEF12", "https://example.com", None)
            .await
            .unwrap();
        cache.invalidate("abcDEF12").await.unwrap();

        assert!(cache.get_url("abcDEF12").await.unwrap().is_none());
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test]
    async fn test_miss_on_unknown_key() {
        let cache = InMemoryCache::new(1800);
        assert!(cache.get_url("missing1").await.unwrap().is_none());
    }
}
