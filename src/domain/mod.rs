//! Domain layer containing the business entity, storage contract and outcomes.
//!
//! # Architecture
//!
//! - [`entities`] - The persisted [`entities::UrlRecord`]
//! - [`repositories`] - The [`repositories::UrlStore`] persistence contract
//! - [`outcome`] - Tagged results returned by the service layer
//! - [`error`] - Classified storage and service failures
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//! Business logic lives in [`crate::application::services`].

pub mod entities;
pub mod error;
pub mod outcome;
pub mod repositories;
