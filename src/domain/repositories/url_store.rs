//! Storage contract for URL records.

use crate::domain::entities::UrlRecord;
use crate::domain::error::StorageError;
use async_trait::async_trait;

/// Persistence interface over the single `url_details` table.
///
/// Every method either succeeds or returns a classified [`StorageError`]. A
/// missing record is a normal result (`Ok(None)` / `Ok(0)`), never an error.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlStore`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Finds a record by its hash (primary key lookup).
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] on backend failure.
    async fn find_by_hash(&self, hash: &str) -> Result<Option<UrlRecord>, StorageError>;

    /// Finds the record whose target URL matches exactly.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] on backend failure.
    async fn find_by_target(&self, target_url: &str) -> Result<Option<UrlRecord>, StorageError>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::HashCollision`] if the hash is already stored.
    /// Returns [`StorageError::DuplicateTarget`] if the target is already mapped.
    async fn insert(&self, record: UrlRecord) -> Result<(), StorageError>;

    /// Deletes the record with the given hash and returns the number of rows removed.
    ///
    /// Deleting a hash that does not exist succeeds with `0`.
    async fn delete(&self, hash: &str) -> Result<u64, StorageError>;

    /// Checks that the backend is reachable.
    async fn test_connection(&self) -> Result<(), StorageError>;
}
