//! Handler for redirect creation.

use axum::{Json, body::Bytes, extract::State};
use validator::Validate;

use crate::api::dto::redirect::{CreateRedirectRequest, RedirectEntryResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a redirect for a long URL.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "expiresIn": 3600 }
/// ```
///
/// Every call mints a new fragment, even for a URL that was shortened before.
/// The body is parsed as JSON whatever `Content-Type` the client sent.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not valid JSON of the expected shape
/// or `url` is empty. Returns 500 if the store is unavailable.
pub async fn create_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RedirectEntryResponse>, AppError> {
    let payload: CreateRedirectRequest = serde_json::from_slice(&body)?;
    payload.validate()?;

    let entry = state
        .redirect_service
        .create(payload.url, payload.expires_in)
        .await?;

    Ok(Json(entry.into()))
}
