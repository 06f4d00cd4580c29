//! Classification of `sqlx` errors into [`StorageError`].

use crate::domain::error::StorageError;

/// Primary key constraint of `url_details`.
pub const HASH_CONSTRAINT: &str = "url_details_pkey";

/// Unique constraint on `url_details.target_url`.
pub const TARGET_CONSTRAINT: &str = "url_details_target_url_key";

/// Postgres `query_canceled`, raised when `statement_timeout` fires.
const QUERY_CANCELED: &str = "57014";

/// Converts a backend error into a classified storage error.
///
/// `hash` is the key involved in the failing statement, if any; it is attached
/// to [`StorageError::HashCollision`].
pub fn classify_sqlx_error(e: sqlx::Error, hash: Option<&str>) -> StorageError {
    match e {
        sqlx::Error::Database(db_err) => {
            if db_err.is_unique_violation() {
                return match db_err.constraint() {
                    Some(TARGET_CONSTRAINT) => StorageError::DuplicateTarget,
                    _ => StorageError::HashCollision(hash.unwrap_or_default().to_string()),
                };
            }

            match db_err.code().as_deref() {
                Some(QUERY_CANCELED) => StorageError::Timeout(db_err.message().to_string()),
                // Class 08: connection exception
                Some(code) if code.starts_with("08") => {
                    StorageError::Unavailable(db_err.message().to_string())
                }
                _ => StorageError::Query(db_err.message().to_string()),
            }
        }
        sqlx::Error::PoolTimedOut => {
            StorageError::Timeout("timed out acquiring a connection".to_string())
        }
        sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => {
            StorageError::Unavailable(e.to_string())
        }
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::Configuration(_) => {
            StorageError::Unavailable(e.to_string())
        }
        other => StorageError::Query(other.to_string()),
    }
}
