//! Redis implementation of the redirect repository.
//!
//! Key layout:
//!
//! | Key | Type | Content |
//! |---|---|---|
//! | `redirector:counter` | integer | shared fragment counter |
//! | `redirector:url:<fragment>:l` | string | original URL ("location") |
//! | `redirector:url:<fragment>:v` | integer | visit count |

use crate::domain::entities::StoredRedirect;
use crate::domain::repositories::RedirectRepository;
use crate::error::AppError;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde_json::json;
use tracing::{debug, info};

/// Key holding the shared counter.
pub const COUNTER_KEY: &str = "redirector:counter";

const URL_KEY_PREFIX: &str = "redirector:url:";
const LOCATION_SUFFIX: &str = ":l";
const VISITS_SUFFIX: &str = ":v";

/// Key holding the original URL of a fragment.
pub fn location_key(fragment: &str) -> String {
    format!("{URL_KEY_PREFIX}{fragment}{LOCATION_SUFFIX}")
}

/// Key holding the visit counter of a fragment.
pub fn visits_key(fragment: &str) -> String {
    format!("{URL_KEY_PREFIX}{fragment}{VISITS_SUFFIX}")
}

/// Pattern matching every location key.
pub fn location_pattern() -> String {
    location_key("*")
}

/// Extracts the fragment from a location key.
pub fn fragment_from_location_key(key: &str) -> Option<&str> {
    key.strip_prefix(URL_KEY_PREFIX)?
        .strip_suffix(LOCATION_SUFFIX)
        .filter(|fragment| !fragment.is_empty())
}

/// Redis-backed redirect repository.
///
/// Uses a `ConnectionManager`, which multiplexes commands over one connection
/// and reconnects transparently. Cloning the manager is cheap; each call works
/// on its own clone.
#[derive(Clone)]
pub struct RedisRedirectRepository {
    conn: ConnectionManager,
}

impl RedisRedirectRepository {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let client = Client::open(redis_url).map_err(|e| {
            AppError::store_unavailable(
                "Failed to create Redis client",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let manager = ConnectionManager::new(client).await?;

        let mut test_conn = manager.clone();
        test_conn.ping::<()>().await?;

        info!("Connected to Redis");

        Ok(Self::new(manager))
    }

    /// Wraps an existing connection manager.
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl RedirectRepository for RedisRedirectRepository {
    async fn next_id(&self) -> Result<u64, AppError> {
        let mut conn = self.conn.clone();
        let id: u64 = conn.incr(COUNTER_KEY, 1).await?;
        Ok(id)
    }

    async fn save(&self, fragment: &str, original_url: &str) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(location_key(fragment), original_url)
            .await?;
        Ok(())
    }

    async fn find_url(&self, fragment: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.conn.clone();
        let url: Option<String> = conn.get(location_key(fragment)).await?;
        Ok(url)
    }

    async fn record_visit(&self, fragment: &str) -> Result<u64, AppError> {
        let mut conn = self.conn.clone();
        let visits: u64 = conn.incr(visits_key(fragment), 1).await?;
        Ok(visits)
    }

    async fn visit_count(&self, fragment: &str) -> Result<u64, AppError> {
        let mut conn = self.conn.clone();
        let visits: Option<u64> = conn.get(visits_key(fragment)).await?;
        Ok(visits.unwrap_or(0))
    }

    async fn list(&self) -> Result<Vec<StoredRedirect>, AppError> {
        let mut conn = self.conn.clone();

        let keys: Vec<String> = conn.keys(location_pattern()).await?;
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let urls: Vec<Option<String>> = conn.mget(&keys).await?;
        debug!(keys = keys.len(), "Scanned location keys");

        // A key can disappear between KEYS and MGET; such entries are skipped.
        Ok(keys
            .iter()
            .zip(urls)
            .filter_map(|(key, url)| {
                let fragment = fragment_from_location_key(key)?;
                let url = url.filter(|u| !u.is_empty())?;
                Some(StoredRedirect::new(fragment, url))
            })
            .collect())
    }

    async fn ping(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}
