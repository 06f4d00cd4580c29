//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::config::ResolveMode;

/// State cloned into each request.
///
/// Built once at startup; never reconfigured at runtime.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    /// Prefix for `short_url`, without trailing slash.
    pub public_base_url: String,
    pub resolve_mode: ResolveMode,
}

impl AppState {
    pub fn new(
        url_service: Arc<UrlService>,
        public_base_url: impl Into<String>,
        resolve_mode: ResolveMode,
    ) -> Self {
        Self {
            url_service,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            resolve_mode,
        }
    }

    /// Full public URL for a hash.
    pub fn short_url(&self, hash: &str) -> String {
        format!("{}/link/{}", self.public_base_url, hash)
    }
}
