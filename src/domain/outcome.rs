//! Tagged results returned by [`UrlService`](crate::application::services::UrlService).
//!
//! Not-found and already-exists are ordinary results, not errors. Only `Failed`
//! carries a [`ServiceFailure`].

use crate::domain::error::ServiceFailure;

/// Result of resolving a hash to its target URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    Found(String),
    NotFound,
    Failed(ServiceFailure),
}

/// Result of shortening a target URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A new record was stored under this hash.
    Created(String),
    /// The target was already shortened; this is its existing hash.
    AlreadyExists(String),
    Failed(ServiceFailure),
}

impl CreateOutcome {
    /// Returns the hash for both success variants.
    pub fn hash(&self) -> Option<&str> {
        match self {
            CreateOutcome::Created(hash) | CreateOutcome::AlreadyExists(hash) => Some(hash),
            CreateOutcome::Failed(_) => None,
        }
    }
}

/// Result of deleting a hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record was removed; carries the target it pointed to.
    Deleted(String),
    NotFound,
    Failed(ServiceFailure),
}
