//! Handler for listing every redirect.

use axum::{Json, extract::State};

use crate::api::dto::redirect::RedirectEntryResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all redirects.
///
/// # Endpoint
///
/// `GET /`
///
/// # Response
///
/// A JSON array in store-defined order. `expiresIn` is always `-1` because
/// expiry is not persisted. An empty store yields `[]`.
///
/// # Performance
///
/// Scans the whole key space on every call.
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<RedirectEntryResponse>>, AppError> {
    let entries = state.redirect_service.list_all().await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
