//! PostgreSQL store implementation.
//!
//! - [`PgUrlStore`] - URL record storage and retrieval

pub mod pg_url_store;

pub use pg_url_store::PgUrlStore;
