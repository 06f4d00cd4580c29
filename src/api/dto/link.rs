//! DTOs for the `/link` endpoints.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Longest accepted target URL, in bytes.
pub const MAX_TARGET_URL_LENGTH: u64 = 2048;

/// Request body for `POST /link`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The original URL to shorten. Stored exactly as submitted.
    #[serde(rename = "TargetUrl", alias = "target_url")]
    #[validate(
        url(message = "Invalid URL format"),
        length(min = 1, max = MAX_TARGET_URL_LENGTH, message = "URL must be at most 2048 characters"),
        custom(function = "validate_target_url")
    )]
    pub target_url: String,
}

/// URL parsing drops tabs and newlines, so they are rejected on the raw string.
/// The stored target must also be usable as a `Location` header.
fn validate_target_url(target_url: &str) -> Result<(), ValidationError> {
    if target_url.chars().any(|c| c.is_ascii_control()) {
        return Err(ValidationError::new("control_characters")
            .with_message("URL must not contain control characters".into()));
    }

    if target_url.len() as u64 > MAX_TARGET_URL_LENGTH {
        return Err(ValidationError::new("too_long")
            .with_message("URL must be at most 2048 bytes".into()));
    }

    Ok(())
}

/// A hash and the target it points to.
///
/// Returned by `GET /link/{hash}` (JSON mode) and `DELETE /link/{hash}`.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub url_hash: String,
    pub target_url: String,
}

/// Response for `POST /link`.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub url_hash: String,
    pub target_url: String,
    pub short_url: String,
    /// `false` when the target was already shortened and the existing hash is returned.
    pub created: bool,
}
