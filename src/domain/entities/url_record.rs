//! URL record entity: the mapping between a short hash and its target URL.

/// A stored hash → target URL mapping.
///
/// Records are immutable once stored; they are only ever inserted or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub hash_value: String,
    pub target_url: String,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(hash_value: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            hash_value: hash_value.into(),
            target_url: target_url.into(),
        }
    }
}
