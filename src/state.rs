//! Shared application state injected into handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::shortening_service::DEFAULT_MAX_ATTEMPTS;
use crate::application::services::{ResolutionService, ShorteningService};
use crate::domain::clock::Clock;
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::cache::{CacheService, DEFAULT_CACHE_TTL_SECONDS};
use crate::utils::code_generator::CodeGenerator;

/// Tunables the services are built with.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Public origin short URLs are built from.
    pub base_url: String,
    pub cache_ttl_seconds: u64,
    pub code_max_attempts: usize,
    /// Deadline applied to every shorten/resolve call from the HTTP layer.
    pub request_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            code_max_attempts: DEFAULT_MAX_ATTEMPTS,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Application state shared by all handlers.
///
/// Cheap to clone: every field is reference-counted or `Copy`.
#[derive(Clone)]
pub struct AppState {
    pub shortening_service: Arc<ShorteningService>,
    pub resolution_service: Arc<ResolutionService>,
    pub repository: Arc<dyn MappingRepository>,
    pub cache: Arc<dyn CacheService>,
    pub request_timeout: Duration,
}

impl AppState {
    /// Wires both services over the given ports.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        cache: Arc<dyn CacheService>,
        codes: Arc<dyn CodeGenerator>,
        clock: Arc<dyn Clock>,
        settings: &ServiceSettings,
    ) -> Self {
        let shortening_service = ShorteningService::new(
            repository.clone(),
            cache.clone(),
            codes,
            clock.clone(),
            settings.base_url.clone(),
        )
        .with_max_attempts(settings.code_max_attempts);

        let resolution_service = ResolutionService::new(repository.clone(), cache.clone(), clock)
            .with_cache_ttl(settings.cache_ttl_seconds);

        Self {
            shortening_service: Arc::new(shortening_service),
            resolution_service: Arc::new(resolution_service),
            repository,
            cache,
            request_timeout: settings.request_timeout,
        }
    }
}
