//! Handlers for the `/link` endpoints (resolve, create, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, CreateLinkResponse, LinkResponse};
use crate::config::ResolveMode;
use crate::domain::outcome::{CreateOutcome, DeleteOutcome, ResolveOutcome};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a hash to its target URL.
///
/// # Endpoint
///
/// `GET /link/{hash}`
///
/// # Response
///
/// Depends on [`ResolveMode`]:
///
/// - **Json** (default): `200 OK` with `{"url_hash": "...", "target_url": "..."}`
/// - **Redirect**: `302 Found` with `Location: <target_url>`
///
/// # Errors
///
/// Returns 404 Not Found if the hash doesn't exist.
/// Returns 500 Internal Server Error on storage failure.
pub async fn resolve_link_handler(
    Path(hash): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.url_service.resolve(&hash).await {
        ResolveOutcome::Found(target_url) => Ok(match state.resolve_mode {
            ResolveMode::Json => Json(LinkResponse {
                url_hash: hash,
                target_url,
            })
            .into_response(),
            ResolveMode::Redirect => {
                (StatusCode::FOUND, [(header::LOCATION, target_url)]).into_response()
            }
        }),
        ResolveOutcome::NotFound => Err(AppError::hash_not_found(&hash)),
        ResolveOutcome::Failed(failure) => Err(failure.into()),
    }
}

/// Shortens a target URL, or returns the existing hash for it.
///
/// # Endpoint
///
/// `POST /link`
///
/// # Request Body
///
/// ```json
/// { "TargetUrl": "https://example.com/a" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "url_hash": "cd69b81ea0",
///   "target_url": "https://example.com/a",
///   "short_url": "http://localhost:8080/link/cd69b81ea0",
///   "created": true
/// }
/// ```
///
/// `created` is `false` when the target was already shortened.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not valid JSON or the URL is invalid.
/// Returns 500 Internal Server Error on storage failure or hash exhaustion.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<Json<CreateLinkResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let (url_hash, created) = match state.url_service.create(&payload.target_url).await {
        CreateOutcome::Created(hash) => (hash, true),
        CreateOutcome::AlreadyExists(hash) => (hash, false),
        CreateOutcome::Failed(failure) => return Err(failure.into()),
    };

    Ok(Json(CreateLinkResponse {
        short_url: state.short_url(&url_hash),
        url_hash,
        target_url: payload.target_url,
        created,
    }))
}

/// Deletes a hash.
///
/// # Endpoint
///
/// `DELETE /link/{hash}`
///
/// # Response
///
/// `200 OK` with the hash and the target URL it pointed to.
///
/// # Errors
///
/// Returns 404 Not Found if the hash doesn't exist (including a repeated delete).
/// Returns 500 Internal Server Error on storage failure.
pub async fn delete_link_handler(
    Path(hash): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    match state.url_service.delete(&hash).await {
        DeleteOutcome::Deleted(target_url) => Ok(Json(LinkResponse {
            url_hash: hash,
            target_url,
        })),
        DeleteOutcome::NotFound => Err(AppError::hash_not_found(&hash)),
        DeleteOutcome::Failed(failure) => Err(failure.into()),
    }
}
