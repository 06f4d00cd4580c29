//! Resolve, create and delete orchestration for short URLs.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::entities::UrlRecord;
use crate::domain::error::{ServiceFailure, StorageError};
use crate::domain::outcome::{CreateOutcome, DeleteOutcome, ResolveOutcome};
use crate::domain::repositories::UrlStore;
use crate::utils::hash_generator::{HashGenerator, seed_for_attempt};

/// Default number of insert attempts under [`CollisionPolicy::Regenerate`].
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// What to do when a freshly generated hash is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Regenerate from a perturbed seed, up to `max_attempts` inserts in total.
    Regenerate { max_attempts: u32 },
    /// Single attempt; a collision fails the request without touching the existing record.
    Strict,
}

impl CollisionPolicy {
    /// Total number of insert attempts allowed.
    pub fn max_attempts(&self) -> u32 {
        match self {
            CollisionPolicy::Regenerate { max_attempts } => (*max_attempts).max(1),
            CollisionPolicy::Strict => 1,
        }
    }
}

impl Default for CollisionPolicy {
    fn default() -> Self {
        CollisionPolicy::Regenerate {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Service for resolving, shortening and deleting URLs.
///
/// Holds no state of its own: every call re-reads the store. The find-then-insert
/// and find-then-delete sequences are two independent round-trips; atomicity is
/// left to the store's constraints.
pub struct UrlService {
    store: Arc<dyn UrlStore>,
    generator: Arc<dyn HashGenerator>,
    policy: CollisionPolicy,
}

impl UrlService {
    /// Creates a new URL service.
    pub fn new(
        store: Arc<dyn UrlStore>,
        generator: Arc<dyn HashGenerator>,
        policy: CollisionPolicy,
    ) -> Self {
        Self {
            store,
            generator,
            policy,
        }
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Looks up the target URL for a hash.
    pub async fn resolve(&self, hash: &str) -> ResolveOutcome {
        match self.store.find_by_hash(hash).await {
            Ok(Some(record)) => ResolveOutcome::Found(record.target_url),
            Ok(None) => {
                debug!(hash, "Hash not found");
                ResolveOutcome::NotFound
            }
            Err(e) => {
                error!(hash, error = %e, "Failed to resolve hash");
                ResolveOutcome::Failed(e.into())
            }
        }
    }

    /// Shortens a target URL.
    ///
    /// # Flow
    ///
    /// 1. If the target is already stored, return its hash as `AlreadyExists`
    /// 2. Otherwise generate a hash and insert
    /// 3. On hash collision, regenerate from a perturbed seed (bounded by the policy)
    /// 4. If a concurrent request stored the same target first, return that hash
    pub async fn create(&self, target_url: &str) -> CreateOutcome {
        match self.store.find_by_target(target_url).await {
            Ok(Some(existing)) => {
                debug!(hash = %existing.hash_value, "Target already shortened");
                return CreateOutcome::AlreadyExists(existing.hash_value);
            }
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, "Failed to look up target url");
                return CreateOutcome::Failed(e.into());
            }
        }

        let max_attempts = self.policy.max_attempts();

        for attempt in 0..max_attempts {
            let hash = self
                .generator
                .generate(&seed_for_attempt(target_url, attempt));

            match self
                .store
                .insert(UrlRecord::new(hash.clone(), target_url))
                .await
            {
                Ok(()) => {
                    info!(hash = %hash, attempt, "Short url created");
                    return CreateOutcome::Created(hash);
                }
                Err(StorageError::HashCollision(_)) => {
                    warn!(hash = %hash, attempt, "Hash collision, regenerating");
                }
                Err(StorageError::DuplicateTarget) => {
                    return self.existing_after_race(target_url).await;
                }
                Err(e) => {
                    error!(hash = %hash, error = %e, "Failed to store short url");
                    return CreateOutcome::Failed(e.into());
                }
            }
        }

        error!(attempts = max_attempts, "Hash space exhausted for target url");
        CreateOutcome::Failed(ServiceFailure::HashCollisionExhausted {
            attempts: max_attempts,
        })
    }

    /// Deletes a hash, reporting the target it pointed to.
    ///
    /// A hash that does not exist yields `NotFound` and no delete is issued.
    pub async fn delete(&self, hash: &str) -> DeleteOutcome {
        let record = match self.store.find_by_hash(hash).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(hash, "Hash not found for delete");
                return DeleteOutcome::NotFound;
            }
            Err(e) => {
                error!(hash, error = %e, "Failed to look up hash for delete");
                return DeleteOutcome::Failed(e.into());
            }
        };

        match self.store.delete(hash).await {
            Ok(rows) => {
                info!(hash, rows, "Short url deleted");
                DeleteOutcome::Deleted(record.target_url)
            }
            Err(e) => {
                error!(hash, error = %e, "Failed to delete short url");
                DeleteOutcome::Failed(e.into())
            }
        }
    }

    /// Checks that the underlying store is reachable.
    pub async fn test_connection(&self) -> Result<(), StorageError> {
        self.store.test_connection().await
    }

    /// Another request inserted the same target between our lookup and insert.
    async fn existing_after_race(&self, target_url: &str) -> CreateOutcome {
        match self.store.find_by_target(target_url).await {
            Ok(Some(existing)) => {
                debug!(hash = %existing.hash_value, "Target stored by concurrent request");
                CreateOutcome::AlreadyExists(existing.hash_value)
            }
            Ok(None) => {
                // Inserted and deleted again before we could read it back.
                CreateOutcome::Failed(StorageError::DuplicateTarget.into())
            }
            Err(e) => {
                error!(error = %e, "Failed to re-read target url after conflict");
                CreateOutcome::Failed(e.into())
            }
        }
    }
}
