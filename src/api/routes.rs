//! API route configuration.

use crate::api::handlers::{create_handler, list_handler, redirect_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Redirect routes.
///
/// # Endpoints
///
/// - `GET  /`            - List all redirects
/// - `POST /`            - Create a redirect
/// - `GET  /{fragment}`  - Redirect to the original URL
pub fn redirect_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route("/{fragment}", get(redirect_handler))
}
