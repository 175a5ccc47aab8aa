//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Row shape of the `url_mappings` table.
#[derive(FromRow)]
struct UrlMappingRow {
    id: i64,
    original_url: String,
    short_code: String,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    click_count: i64,
}

impl From<UrlMappingRow> for UrlMapping {
    fn from(r: UrlMappingRow) -> Self {
        UrlMapping::new(
            r.id,
            r.original_url,
            r.short_code,
            r.created_at,
            r.expires_at,
            r.click_count,
        )
    }
}

/// PostgreSQL repository for URL mappings.
///
/// Uniqueness of `short_code` is enforced by the `url_mappings_short_code_key`
/// constraint; violations surface as [`AppError::Conflict`].
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(
            r#"
            SELECT id, original_url, short_code, created_at, expires_at, click_count
            FROM url_mappings
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn exists_by_short_code(&self, short_code: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM url_mappings WHERE short_code = $1)",
        )
        .bind(short_code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(
            r#"
            INSERT INTO url_mappings (original_url, short_code, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, original_url, short_code, created_at, expires_at, click_count
            "#,
        )
        .bind(&new_mapping.original_url)
        .bind(&new_mapping.short_code)
        .bind(new_mapping.created_at)
        .bind(new_mapping.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn save(&self, mapping: &UrlMapping) -> Result<UrlMapping, AppError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(
            r#"
            UPDATE url_mappings
            SET original_url = $2, short_code = $3, expires_at = $4, click_count = $5
            WHERE id = $1
            RETURNING id, original_url, short_code, created_at, expires_at, click_count
            "#,
        )
        .bind(mapping.id)
        .bind(&mapping.original_url)
        .bind(&mapping.short_code)
        .bind(mapping.expires_at)
        .bind(mapping.click_count)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(UrlMapping::from).ok_or_else(|| {
            AppError::not_found("URL mapping not found", json!({ "id": mapping.id }))
        })
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
