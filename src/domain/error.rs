//! Typed failures produced by the persistence boundary and the service layer.

use thiserror::Error;

/// Classified failure of a [`UrlStore`](crate::domain::repositories::UrlStore) operation.
///
/// Backend-native errors are converted into one of these variants inside the
/// store implementation and never escape it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The hash is already taken by another record (primary key violation).
    #[error("hash already exists: {0}")]
    HashCollision(String),

    /// The target URL is already mapped to a hash (unique constraint on target).
    #[error("target url is already shortened")]
    DuplicateTarget,

    /// Backend unreachable: connect failure, closed pool, I/O or TLS error.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// Acquiring a connection or running a statement exceeded its deadline.
    #[error("storage operation timed out: {0}")]
    Timeout(String),

    /// Any other failure reported by the backend.
    #[error("storage query failed: {0}")]
    Query(String),
}

/// Reason carried by the `Failed` variant of every service outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceFailure {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The bounded regeneration loop could not find an unused hash.
    #[error("no free hash found after {attempts} attempt(s)")]
    HashCollisionExhausted { attempts: u32 },
}

impl ServiceFailure {
    /// Short machine-readable kind used in logs and error details.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceFailure::Storage(StorageError::HashCollision(_)) => "hash_collision",
            ServiceFailure::Storage(StorageError::DuplicateTarget) => "duplicate_target",
            ServiceFailure::Storage(StorageError::Unavailable(_)) => "storage_unavailable",
            ServiceFailure::Storage(StorageError::Timeout(_)) => "storage_timeout",
            ServiceFailure::Storage(StorageError::Query(_)) => "storage_query",
            ServiceFailure::HashCollisionExhausted { .. } => "hash_collision_exhausted",
        }
    }
}
