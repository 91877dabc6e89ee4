//! Repository trait for redirect data access.

use crate::domain::entities::StoredRedirect;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract behind the redirect service.
///
/// Every mutation is a single-key atomic operation on the backing store, so
/// implementations need no in-process locking across calls and callers need no
/// transactions. Implementations never retry; a failed call surfaces as
/// [`AppError::StoreUnavailable`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RedisRedirectRepository`] - Redis
/// - [`crate::infrastructure::persistence::MemoryRedirectRepository`] - in-process
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectRepository: Send + Sync {
    /// Atomically increments the shared counter and returns the new value.
    ///
    /// The first call on an empty store returns `1`. Concurrent callers always
    /// observe distinct values.
    async fn next_id(&self) -> Result<u64, AppError>;

    /// Persists `fragment -> original_url` with no expiration.
    async fn save(&self, fragment: &str, original_url: &str) -> Result<(), AppError>;

    /// Looks up the original URL for a fragment.
    ///
    /// Returns `Ok(None)` when no mapping exists.
    async fn find_url(&self, fragment: &str) -> Result<Option<String>, AppError>;

    /// Atomically increments the visit counter of a fragment and returns the
    /// new count.
    async fn record_visit(&self, fragment: &str) -> Result<u64, AppError>;

    /// Reads the visit counter of a fragment (`0` if never visited).
    async fn visit_count(&self, fragment: &str) -> Result<u64, AppError>;

    /// Returns every stored mapping, in no particular order.
    ///
    /// This is a full scan of the key space.
    async fn list(&self) -> Result<Vec<StoredRedirect>, AppError>;

    /// Checks whether the backing store is reachable.
    async fn ping(&self) -> bool;
}
