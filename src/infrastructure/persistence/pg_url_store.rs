//! PostgreSQL implementation of the URL store.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::UrlRecord;
use crate::domain::error::StorageError;
use crate::domain::repositories::UrlStore;
use crate::utils::db_error::classify_sqlx_error;

#[derive(Debug, FromRow)]
struct UrlRow {
    hash_value: String,
    target_url: String,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::new(row.hash_value, row.target_url)
    }
}

/// PostgreSQL store over the `url_details` table.
///
/// Uses bound parameters for every statement. All `sqlx` errors are classified
/// into [`StorageError`] before leaving this type; none are retried.
pub struct PgUrlStore {
    pool: Arc<PgPool>,
}

impl PgUrlStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlStore for PgUrlStore {
    async fn find_by_hash(&self, hash: &str) -> Result<Option<UrlRecord>, StorageError> {
        let row = sqlx::query_as::<_, UrlRow>(
            "SELECT hash_value, target_url FROM url_details WHERE hash_value = $1",
        )
        .bind(hash)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| classify_sqlx_error(e, Some(hash)))?;

        Ok(row.map(UrlRecord::from))
    }

    async fn find_by_target(&self, target_url: &str) -> Result<Option<UrlRecord>, StorageError> {
        let row = sqlx::query_as::<_, UrlRow>(
            "SELECT hash_value, target_url FROM url_details WHERE target_url = $1 LIMIT 1",
        )
        .bind(target_url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| classify_sqlx_error(e, None))?;

        Ok(row.map(UrlRecord::from))
    }

    async fn insert(&self, record: UrlRecord) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO url_details (hash_value, target_url) VALUES ($1, $2)")
            .bind(&record.hash_value)
            .bind(&record.target_url)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| classify_sqlx_error(e, Some(&record.hash_value)))?;

        Ok(())
    }

    async fn delete(&self, hash: &str) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM url_details WHERE hash_value = $1")
            .bind(hash)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| classify_sqlx_error(e, Some(hash)))?;

        Ok(result.rows_affected())
    }

    async fn test_connection(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| classify_sqlx_error(e, None))?;

        Ok(())
    }
}
