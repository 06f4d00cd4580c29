//! HTTP request handlers for API endpoints.

pub mod health;
pub mod link;

pub use health::health_handler;
pub use link::{create_link_handler, delete_link_handler, resolve_link_handler};
