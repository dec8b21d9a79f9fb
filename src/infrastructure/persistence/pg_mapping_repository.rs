//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// PostgreSQL repository for URL mappings.
///
/// Short code uniqueness is enforced by the `url_mappings_short_code_key`
/// constraint; a violating insert surfaces as [`AppError::Conflict`].
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Deletes every mapping expired before `now` and returns their codes.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError> {
        let codes = sqlx::query_scalar::<_, String>(
            r#"
            DELETE FROM url_mappings
            WHERE expires_at IS NOT NULL AND expires_at < $1
            RETURNING short_code
            "#,
        )
        .bind(now)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(codes)
    }
}

#[derive(sqlx::FromRow)]
struct MappingRow {
    id: i64,
    short_code: String,
    original_url: String,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl From<MappingRow> for UrlMapping {
    fn from(r: MappingRow) -> Self {
        UrlMapping::new(r.id, r.short_code, r.original_url, r.created_at, r.expires_at)
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, short_code, original_url, created_at, expires_at
            FROM url_mappings
            WHERE original_url = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, short_code, original_url, created_at, expires_at
            FROM url_mappings
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO url_mappings (short_code, original_url, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, short_code, original_url, created_at, expires_at
            "#,
        )
        .bind(&new_mapping.short_code)
        .bind(&new_mapping.original_url)
        .bind(new_mapping.created_at)
        .bind(new_mapping.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn delete(&self, mapping: &UrlMapping) -> Result<(), AppError> {
        sqlx::query("DELETE FROM url_mappings WHERE id = $1")
            .bind(mapping.id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        Ok(self.purge_expired(now).await?.len() as u64)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
