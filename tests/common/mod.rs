#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::Request;
use axum::{Router, ServiceExt};
use axum_test::TestServer;
use shrinkify::api::routes::link_routes;
use shrinkify::application::services::{CollisionPolicy, UrlService};
use shrinkify::config::ResolveMode;
use shrinkify::domain::entities::UrlRecord;
use shrinkify::domain::error::StorageError;
use shrinkify::domain::repositories::UrlStore;
use shrinkify::routes::app_router;
use shrinkify::state::AppState;
use shrinkify::utils::hash_generator::{HashGenerator, Md5HashGenerator};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "http://sh.test";

/// In-memory store enforcing the same constraints as the `url_details` table:
/// unique hash and unique target.
#[derive(Default)]
pub struct InMemoryUrlStore {
    records: Mutex<HashMap<String, String>>,
    failure: Mutex<Option<StorageError>>,
}

impl InMemoryUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `error`.
    pub fn fail_with(&self, error: StorageError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn seed(&self, hash: &str, target: &str) {
        self.records
            .lock()
            .unwrap()
            .insert(hash.to_string(), target.to_string());
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), StorageError> {
        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UrlStore for InMemoryUrlStore {
    async fn find_by_hash(&self, hash: &str) -> Result<Option<UrlRecord>, StorageError> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(hash)
            .map(|target| UrlRecord::new(hash, target.as_str())))
    }

    async fn find_by_target(&self, target_url: &str) -> Result<Option<UrlRecord>, StorageError> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|(_, target)| target.as_str() == target_url)
            .map(|(hash, target)| UrlRecord::new(hash.as_str(), target.as_str())))
    }

    async fn insert(&self, record: UrlRecord) -> Result<(), StorageError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();

        if records.contains_key(&record.hash_value) {
            return Err(StorageError::HashCollision(record.hash_value));
        }
        if records.values().any(|target| *target == record.target_url) {
            return Err(StorageError::DuplicateTarget);
        }

        records.insert(record.hash_value, record.target_url);
        Ok(())
    }

    async fn delete(&self, hash: &str) -> Result<u64, StorageError> {
        self.check()?;
        Ok(self.records.lock().unwrap().remove(hash).map_or(0, |_| 1))
    }

    async fn test_connection(&self) -> Result<(), StorageError> {
        self.check()
    }
}

/// Generator that maps every first-attempt seed to the same hash, forcing
/// unrelated targets to collide. Regenerated seeds (`{target}#{n}`) use MD5.
pub struct CollidingGenerator {
    pub fixed: String,
}

impl HashGenerator for CollidingGenerator {
    fn generate(&self, seed: &str) -> String {
        if seed.contains('#') {
            Md5HashGenerator::default().generate(seed)
        } else {
            self.fixed.clone()
        }
    }
}

pub fn md5_hash(seed: &str) -> String {
    Md5HashGenerator::default().generate(seed)
}

pub fn create_test_service(store: Arc<InMemoryUrlStore>) -> UrlService {
    UrlService::new(
        store,
        Arc::new(Md5HashGenerator::default()),
        CollisionPolicy::default(),
    )
}

pub fn create_test_state(store: Arc<InMemoryUrlStore>, resolve_mode: ResolveMode) -> AppState {
    AppState::new(
        Arc::new(create_test_service(store)),
        BASE_URL,
        resolve_mode,
    )
}

pub fn make_server(state: AppState) -> TestServer {
    let app: Router = link_routes().with_state(state);
    TestServer::new(app).unwrap()
}

/// Serves the full application router, including path normalization and tracing.
pub fn make_app_server(state: AppState) -> TestServer {
    let app = app_router(state);
    TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap()
}
