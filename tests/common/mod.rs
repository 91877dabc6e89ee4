#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::Request;
use axum::{Router, ServiceExt};
use axum_test::TestServer;
use redirector::api::routes::redirect_routes;
use redirector::domain::entities::StoredRedirect;
use redirector::domain::repositories::RedirectRepository;
use redirector::error::AppError;
use redirector::infrastructure::persistence::MemoryRedirectRepository;
use redirector::routes::app_router;
use redirector::state::AppState;
use std::sync::Arc;

pub const BASE_URI: &str = "http://s.test";

pub fn create_test_state() -> (AppState, Arc<MemoryRedirectRepository>) {
    let repo = Arc::new(MemoryRedirectRepository::new());
    let state = AppState::new(repo.clone() as Arc<dyn RedirectRepository>, BASE_URI);
    (state, repo)
}

/// Repository whose every call fails, as if the store were down.
pub struct UnreachableRepository;

fn unreachable_store() -> AppError {
    AppError::store_unavailable("connection refused", serde_json::json!({}))
}

#[async_trait]
impl RedirectRepository for UnreachableRepository {
    async fn next_id(&self) -> Result<u64, AppError> {
        Err(unreachable_store())
    }

    async fn save(&self, _fragment: &str, _original_url: &str) -> Result<(), AppError> {
        Err(unreachable_store())
    }

    async fn find_url(&self, _fragment: &str) -> Result<Option<String>, AppError> {
        Err(unreachable_store())
    }

    async fn record_visit(&self, _fragment: &str) -> Result<u64, AppError> {
        Err(unreachable_store())
    }

    async fn visit_count(&self, _fragment: &str) -> Result<u64, AppError> {
        Err(unreachable_store())
    }

    async fn list(&self) -> Result<Vec<StoredRedirect>, AppError> {
        Err(unreachable_store())
    }

    async fn ping(&self) -> bool {
        false
    }
}

pub fn create_unreachable_state() -> AppState {
    AppState::new(Arc::new(UnreachableRepository), BASE_URI)
}

/// Server with only the redirect routes, no middleware.
pub fn redirect_server(state: AppState) -> TestServer {
    let app = Router::new().merge(redirect_routes()).with_state(state);
    TestServer::new(app).unwrap()
}

/// Server with the full application router and middleware.
pub fn app_server(state: AppState, cors_allowed_origins: &[String]) -> TestServer {
    let app = app_router(state, cors_allowed_origins);
    TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap()
}
