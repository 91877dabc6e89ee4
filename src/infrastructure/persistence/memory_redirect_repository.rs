//! In-process implementation of the redirect repository.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::entities::StoredRedirect;
use crate::domain::repositories::RedirectRepository;
use crate::error::AppError;

/// Redirect repository kept entirely in memory.
///
/// Mirrors the Redis semantics (atomic counter, per-fragment visit counters)
/// without persistence: everything is lost when the process exits. Used for
/// local development (`STORE_BACKEND=memory`) and tests.
#[derive(Debug, Default)]
pub struct MemoryRedirectRepository {
    counter: AtomicU64,
    urls: DashMap<String, String>,
    visits: DashMap<String, u64>,
}

impl MemoryRedirectRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        debug!("Using in-memory redirect store");
        Self::default()
    }

    /// Current value of the shared counter.
    pub fn counter(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RedirectRepository for MemoryRedirectRepository {
    async fn next_id(&self) -> Result<u64, AppError> {
        Ok(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn save(&self, fragment: &str, original_url: &str) -> Result<(), AppError> {
        self.urls
            .insert(fragment.to_owned(), original_url.to_owned());
        Ok(())
    }

    async fn find_url(&self, fragment: &str) -> Result<Option<String>, AppError> {
        Ok(self.urls.get(fragment).map(|url| url.value().clone()))
    }

    async fn record_visit(&self, fragment: &str) -> Result<u64, AppError> {
        let mut visits = self.visits.entry(fragment.to_owned()).or_insert(0);
        *visits += 1;
        Ok(*visits)
    }

    async fn visit_count(&self, fragment: &str) -> Result<u64, AppError> {
        Ok(self.visits.get(fragment).map(|v| *v).unwrap_or(0))
    }

    async fn list(&self) -> Result<Vec<StoredRedirect>, AppError> {
        Ok(self
            .urls
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| StoredRedirect::new(entry.key().clone(), entry.value().clone()))
            .collect())
    }

    async fn ping(&self) -> bool {
        true
    }
}
