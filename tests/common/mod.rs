#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use shortlink::domain::clock::FixedClock;
use shortlink::infrastructure::cache::InMemoryCache;
use shortlink::infrastructure::persistence::InMemoryMappingRepository;
use shortlink::routes::router;
use shortlink::state::{AppState, ServiceSettings};
use shortlink::utils::code_generator::{CodeGenerator, SeededCodeGenerator};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "http://localhost:8080";

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()
}

/// Hands out queued codes first, then falls back to a seeded generator.
pub struct ScriptedCodes {
    queue: Mutex<VecDeque<String>>,
    fallback: SeededCodeGenerator,
}

impl ScriptedCodes {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: SeededCodeGenerator::new(42),
        }
    }

    pub fn push(&self, codes: &[&str]) {
        self.queue
            .lock()
            .unwrap()
            .extend(codes.iter().map(|c| c.to_string()));
    }
}

impl CodeGenerator for ScriptedCodes {
    fn generate(&self) -> String {
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.generate())
    }
}

/// Application wired over in-memory adapters with handles to each of them.
pub struct TestApp {
    pub repository: Arc<InMemoryMappingRepository>,
    pub cache: Arc<InMemoryCache>,
    pub clock: Arc<FixedClock>,
    pub codes: Arc<ScriptedCodes>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings(ServiceSettings {
            base_url: BASE_URL.to_string(),
            ..ServiceSettings::default()
        })
    }

    pub fn with_settings(settings: ServiceSettings) -> Self {
        let repository = Arc::new(InMemoryMappingRepository::new());
        let cache = Arc::new(InMemoryCache::new(settings.cache_ttl_seconds));
        let clock = Arc::new(FixedClock::new(start_time()));
        let codes = Arc::new(ScriptedCodes::new());

        let state = AppState::new(
            repository.clone(),
            cache.clone(),
            codes.clone(),
            clock.clone(),
            &settings,
        );

        Self {
            repository,
            cache,
            clock,
            codes,
            state,
        }
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(router(self.state.clone())).unwrap()
    }
}
