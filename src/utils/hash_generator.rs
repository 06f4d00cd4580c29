//! Short hash generation.
//!
//! Hashes are the lowercase hex MD5 digest of a seed, truncated to a fixed
//! length. The result is deterministic: the same seed always yields the same
//! hash. With the default length of 10 characters only 40 bits of the digest
//! survive, so unrelated URLs can collide; collision handling belongs to
//! [`crate::application::services::UrlService`].

use md5::{Digest, Md5};

/// Default number of hex characters kept from the digest.
pub const DEFAULT_HASH_LENGTH: usize = 10;

/// Shortest accepted hash length.
pub const MIN_HASH_LENGTH: usize = 4;

/// Longest accepted hash length (full MD5 hex digest).
pub const MAX_HASH_LENGTH: usize = 32;

/// Produces a short code from a seed string.
///
/// Implementations must be pure: no side effects and the same output for the
/// same input.
#[cfg_attr(test, mockall::automock)]
pub trait HashGenerator: Send + Sync {
    fn generate(&self, seed: &str) -> String;
}

/// MD5-based generator keeping the first `length` hex characters.
#[derive(Debug, Clone, Copy)]
pub struct Md5HashGenerator {
    length: usize,
}

impl Md5HashGenerator {
    /// Creates a generator producing hashes of `length` characters.
    ///
    /// The length is clamped to [`MIN_HASH_LENGTH`]..=[`MAX_HASH_LENGTH`].
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_HASH_LENGTH, MAX_HASH_LENGTH),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for Md5HashGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_LENGTH)
    }
}

impl HashGenerator for Md5HashGenerator {
    fn generate(&self, seed: &str) -> String {
        let digest = Md5::digest(seed.as_bytes());
        let mut encoded = hex::encode(digest);
        encoded.truncate(self.length);
        encoded
    }
}

/// Builds the seed for a given generation attempt.
///
/// Attempt 0 hashes the target itself, so a URL's first candidate is always
/// its plain truncated digest. Later attempts append `#{attempt}`.
pub fn seed_for_attempt(target_url: &str, attempt: u32) -> String {
    if attempt == 0 {
        target_url.to_string()
    } else {
        format!("{target_url}#{attempt}")
    }
}
