//! Utility functions for hash generation and database error handling.
//!
//! - [`hash_generator`] - Truncated MD5 short hash generation
//! - [`db_error`] - Classification of `sqlx` errors

pub mod db_error;
pub mod hash_generator;
