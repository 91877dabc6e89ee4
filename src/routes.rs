//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`            - List redirects
//! - `POST /`            - Create a redirect
//! - `GET  /health`      - Health check
//! - `GET  /{fragment}`  - Redirect
//!
//! Fragments are at least nine characters long, so they never collide with
//! `/health`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Configurable allowed origins
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_allowed_origins` - allowed CORS origins, empty for any
pub fn app_router(state: AppState, cors_allowed_origins: &[String]) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::redirect_routes())
        .with_state(state)
        .layer(cors::layer(cors_allowed_origins))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
