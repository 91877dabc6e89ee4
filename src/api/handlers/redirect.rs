//! Handler for fragment redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a fragment to its original URL.
///
/// # Endpoint
///
/// `GET /{fragment}`
///
/// Responds with `302 Found` and the original URL in `Location`. The visit is
/// counted before responding; a failure to count it does not fail the
/// redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the fragment is unknown.
pub async fn redirect_handler(
    Path(fragment): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.redirect_service.resolve(&fragment).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]))
}
