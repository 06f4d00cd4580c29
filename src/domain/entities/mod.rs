//! Core domain entities.
//!
//! The service persists exactly one entity, [`UrlRecord`], keyed by its hash.

pub mod url_record;

pub use url_record::UrlRecord;
