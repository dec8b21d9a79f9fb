//! In-memory implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::expiry::is_expired;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// In-process mapping store keyed by short code.
///
/// Insert goes through the `DashMap` entry API, so the uniqueness check and
/// the write happen under the same shard lock, mirroring a database unique
/// constraint. Lookups by original URL scan every entry, which is fine for
/// tests and small single-node deployments.
#[derive(Debug)]
pub struct InMemoryMappingRepository {
    by_code: DashMap<String, UrlMapping>,
    next_id: AtomicI64,
}

impl InMemoryMappingRepository {
    pub fn new() -> Self {
        Self {
            by_code: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// All mappings stored for `original_url`, oldest first.
    pub fn mappings_for(&self, original_url: &str) -> Vec<UrlMapping> {
        let mut found: Vec<UrlMapping> = self
            .by_code
            .iter()
            .filter(|entry| entry.original_url == original_url)
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by_key(|m| (m.created_at, m.id));
        found
    }
}

impl Default for InMemoryMappingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        Ok(self.mappings_for(original_url).pop())
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        Ok(self.by_code.get(short_code).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        match self.by_code.entry(new_mapping.short_code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Unique constraint violation: short code {} already exists",
                new_mapping.short_code
            ))),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let mapping = new_mapping.into_mapping(id);
                slot.insert(mapping.clone());
                Ok(mapping)
            }
        }
    }

    async fn delete(&self, mapping: &UrlMapping) -> Result<(), AppError> {
        self.by_code
            .remove_if(&mapping.short_code, |_, stored| stored.id == mapping.id);
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut removed = 0u64;
        self.by_code.retain(|_, mapping| {
            let expired = is_expired(mapping.expires_at, now);
            if expired {
                removed += 1;
            }
            !expired
        });
        Ok(removed)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.by_code.len() as i64)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
