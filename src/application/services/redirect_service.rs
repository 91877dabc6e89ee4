//! Redirect creation, listing and resolution service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{RedirectEntry, StoredRedirect, UNKNOWN_EXPIRY};
use crate::domain::repositories::RedirectRepository;
use crate::error::AppError;
use crate::utils::fragment::encode_fragment;

/// Service implementing the three redirect operations used by the HTTP layer.
///
/// Holds the repository handle and the public base URI it was constructed
/// with. All coordination between concurrent callers is delegated to the
/// repository's atomic operations; the service keeps no mutable state.
pub struct RedirectService<R: RedirectRepository + ?Sized> {
    repository: Arc<R>,
    base_uri: String,
}

impl<R: RedirectRepository + ?Sized> RedirectService<R> {
    /// Creates a new redirect service.
    ///
    /// A trailing `/` on `base_uri` is dropped so public URLs never contain
    /// `//` before the fragment.
    pub fn new(repository: Arc<R>, base_uri: impl Into<String>) -> Self {
        let base_uri = base_uri.into().trim_end_matches('/').to_string();
        Self {
            repository,
            base_uri,
        }
    }

    /// Builds the public short URL for a fragment.
    pub fn public_url(&self, fragment: &str) -> String {
        format!("{}/{}", self.base_uri, fragment)
    }

    /// Mints a new fragment for `original_url` and persists the mapping.
    ///
    /// Every call mints a new fragment, even for a URL that is already stored.
    /// `expires_in` is echoed back unchanged and has no effect on storage.
    ///
    /// If the mapping write fails after the counter was incremented, that
    /// counter value is never used. Nothing is rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if either store call fails.
    pub async fn create(
        &self,
        original_url: String,
        expires_in: i64,
    ) -> Result<RedirectEntry, AppError> {
        let counter = self.repository.next_id().await?;
        let fragment = encode_fragment(counter);

        self.repository.save(&fragment, &original_url).await?;

        info!(
            original = %original_url,
            fragment = %fragment,
            counter,
            "Redirect created"
        );

        let url = self.public_url(&fragment);
        Ok(RedirectEntry::new(fragment, url, original_url, expires_in))
    }

    /// Lists every stored redirect, in store-defined order.
    ///
    /// Expiry is not persisted, so every entry reports [`UNKNOWN_EXPIRY`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the scan fails.
    pub async fn list_all(&self) -> Result<Vec<RedirectEntry>, AppError> {
        let stored = self.repository.list().await?;
        debug!(count = stored.len(), "Listed redirects");

        Ok(stored
            .into_iter()
            .map(|StoredRedirect { fragment, original_url }| {
                let url = self.public_url(&fragment);
                RedirectEntry::new(fragment, url, original_url, UNKNOWN_EXPIRY)
            })
            .collect())
    }

    /// Resolves a fragment to its original URL and counts the visit.
    ///
    /// The visit increment is best-effort: a failure is logged and the URL is
    /// still returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping exists or the stored URL is
    /// empty, and [`AppError::StoreUnavailable`] if the lookup itself fails.
    pub async fn resolve(&self, fragment: &str) -> Result<String, AppError> {
        let original_url = self
            .repository
            .find_url(fragment)
            .await?
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                AppError::not_found("Redirect not found", json!({ "fragment": fragment }))
            })?;

        match self.repository.record_visit(fragment).await {
            Ok(visits) => info!(fragment, destination = %original_url, visits, "Redirect resolved"),
            Err(e) => warn!(fragment, error = %e, "Failed to record visit"),
        }

        Ok(original_url)
    }

    /// Returns the raw visit counter of a fragment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the store call fails.
    pub async fn visit_count(&self, fragment: &str) -> Result<u64, AppError> {
        self.repository.visit_count(fragment).await
    }

    /// Checks whether the backing store is reachable.
    pub async fn health_check(&self) -> bool {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockRedirectRepository;
    use mockall::predicate::eq;

    const BASE: &str = "http://s.test";

    fn service(repo: MockRedirectRepository) -> RedirectService<MockRedirectRepository> {
        RedirectService::new(Arc::new(repo), BASE)
    }

    fn store_error() -> AppError {
        AppError::store_unavailable("connection refused", json!({}))
    }

    #[tokio::test]
    async fn test_create_encodes_counter_and_saves() {
        let mut repo = MockRedirectRepository::new();
        repo.expect_next_id().times(1).returning(|| Ok(1));
        repo.expect_save()
            .with(eq("000000001"), eq("https://example.com"))
            .times(1)
            .returning(|_, _| Ok(()));

        let entry = service(repo)
            .create("https://example.com".to_string(), 3600)
            .await
            .unwrap();

        assert_eq!(entry.fragment, "000000001");
        assert_eq!(entry.url, "http://s.test/000000001");
        assert_eq!(entry.original_url, "https://example.com");
        assert_eq!(entry.expires_in, 3600);
    }

    #[tokio::test]
    async fn test_create_trims_trailing_slash_from_base_uri() {
        let mut repo = MockRedirectRepository::new();
        repo.expect_next_id().returning(|| Ok(62));
        repo.expect_save().returning(|_, _| Ok(()));

        let service = RedirectService::new(Arc::new(repo), "https://go.example.com/");
        let entry = service
            .create("https://example.com".to_string(), 0)
            .await
            .unwrap();

        assert_eq!(entry.url, "https://go.example.com/000000010");
    }

    #[tokio::test]
    async fn test_create_counter_failure_skips_save() {
        let mut repo = MockRedirectRepository::new();
        repo.expect_next_id().times(1).returning(|| Err(store_error()));
        repo.expect_save().times(0);

        let result = service(repo)
            .create("https://example.com".to_string(), 0)
            .await;

        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_create_save_failure_is_surfaced() {
        let mut repo = MockRedirectRepository::new();
        repo.expect_next_id().times(1).returning(|| Ok(7));
        repo.expect_save().times(1).returning(|_, _| Err(store_error()));

        let result = service(repo)
            .create("https://example.com".to_string(), 0)
            .await;

        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_list_all_reports_unknown_expiry() {
        let mut repo = MockRedirectRepository::new();
        repo.expect_list().times(1).returning(|| {
            Ok(vec![
                StoredRedirect::new("000000001", "https://a.com"),
                StoredRedirect::new("000000002", "https://b.com"),
            ])
        });

        let entries = service(repo).list_all().await.unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.expires_in == UNKNOWN_EXPIRY));
        assert_eq!(entries[0].url, "http://s.test/000000001");
        assert_eq!(entries[1].original_url, "https://b.com");
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let mut repo = MockRedirectRepository::new();
        repo.expect_list().returning(|| Ok(vec![]));

        let entries = service(repo).list_all().await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_counts_visit() {
        let mut repo = MockRedirectRepository::new();
        repo.expect_find_url()
            .with(eq("000000001"))
            .returning(|_| Ok(Some("https://example.com".to_string())));
        repo.expect_record_visit()
            .with(eq("000000001"))
            .times(1)
            .returning(|_| Ok(1));

        let url = service(repo).resolve("000000001").await.unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut repo = MockRedirectRepository::new();
        repo.expect_find_url().returning(|_| Ok(None));
        repo.expect_record_visit().times(0);

        let result = service(repo).resolve("doesnotexist").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_empty_url_is_not_found() {
        let mut repo = MockRedirectRepository::new();
        repo.expect_find_url().returning(|_| Ok(Some(String::new())));
        repo.expect_record_visit().times(0);

        let result = service(repo).resolve("000000001").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_ignores_visit_failure() {
        let mut repo = MockRedirectRepository::new();
        repo.expect_find_url()
            .returning(|_| Ok(Some("https://example.com".to_string())));
        repo.expect_record_visit()
            .times(1)
            .returning(|_| Err(store_error()));

        let url = service(repo).resolve("000000001").await.unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_lookup_failure_is_surfaced() {
        let mut repo = MockRedirectRepository::new();
        repo.expect_find_url().returning(|_| Err(store_error()));

        let result = service(repo).resolve("000000001").await;
        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_health_check_delegates_to_ping() {
        let mut repo = MockRedirectRepository::new();
        repo.expect_ping().times(1).returning(|| false);

        assert!(!service(repo).health_check().await);
    }
}
