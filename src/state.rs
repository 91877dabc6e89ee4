//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::RedirectService;
use crate::domain::repositories::RedirectRepository;

/// Redirect service over whichever store backend was configured.
pub type DynRedirectService = RedirectService<dyn RedirectRepository>;

/// State shared by all request handlers.
///
/// Cloning is cheap: the service is reference counted and holds the only
/// store handle.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<DynRedirectService>,
}

impl AppState {
    /// Builds the state from a repository handle and the public base URI.
    pub fn new(repository: Arc<dyn RedirectRepository>, public_url: impl Into<String>) -> Self {
        Self {
            redirect_service: Arc::new(RedirectService::new(repository, public_url)),
        }
    }
}
