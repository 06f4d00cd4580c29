//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, health_handler, resolve_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link and health routes.
///
/// # Endpoints
///
/// - `POST   /link`         - Shorten a URL (or return its existing hash)
/// - `GET    /link/{hash}`  - Resolve a hash (JSON or redirect)
/// - `DELETE /link/{hash}`  - Delete a hash
/// - `GET    /health`       - Database liveness probe
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/link", post(create_link_handler))
        .route(
            "/link/{hash}",
            get(resolve_link_handler).delete(delete_link_handler),
        )
        .route("/health", get(health_handler))
}
