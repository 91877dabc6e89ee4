//! Redis repository tests against a live server.
//!
//! Run with `cargo test --test repository_redis -- --ignored`. The database
//! selected by `REDIS_TEST_URL` (default `redis://127.0.0.1:6379/15`) is
//! flushed before every test.

use redirector::domain::entities::StoredRedirect;
use redirector::domain::repositories::RedirectRepository;
use redirector::infrastructure::persistence::RedisRedirectRepository;
use redirector::infrastructure::persistence::redis_redirect_repository::{
    COUNTER_KEY, location_key, visits_key,
};
use redis::AsyncCommands;
use serial_test::serial;
use std::collections::HashSet;
use std::sync::Arc;

fn test_url() -> String {
    std::env::var("REDIS_TEST_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/15".to_string())
}

async fn raw_connection() -> redis::aio::ConnectionManager {
    let client = redis::Client::open(test_url()).unwrap();
    redis::aio::ConnectionManager::new(client).await.unwrap()
}

async fn fresh_repository() -> RedisRedirectRepository {
    let mut conn = raw_connection().await;
    redis::cmd("FLUSHDB")
        .query_async::<()>(&mut conn)
        .await
        .unwrap();

    RedisRedirectRepository::connect(&test_url()).await.unwrap()
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis server"]
async fn test_counter_lives_under_shared_key() {
    let repo = fresh_repository().await;

    assert_eq!(repo.next_id().await.unwrap(), 1);
    assert_eq!(repo.next_id().await.unwrap(), 2);

    let mut conn = raw_connection().await;
    let stored: u64 = conn.get(COUNTER_KEY).await.unwrap();
    assert_eq!(stored, 2);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis server"]
async fn test_save_uses_location_key_without_ttl() {
    let repo = fresh_repository().await;
    repo.save("000000001", "https://example.com").await.unwrap();

    let mut conn = raw_connection().await;
    let url: String = conn.get(location_key("000000001")).await.unwrap();
    assert_eq!(url, "https://example.com");

    let ttl: i64 = conn.ttl(location_key("000000001")).await.unwrap();
    assert_eq!(ttl, -1);

    assert_eq!(
        repo.find_url("000000001").await.unwrap(),
        Some("https://example.com".to_string())
    );
    assert_eq!(repo.find_url("000000002").await.unwrap(), None);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis server"]
async fn test_visits_use_visit_key() {
    let repo = fresh_repository().await;

    assert_eq!(repo.visit_count("000000001").await.unwrap(), 0);
    assert_eq!(repo.record_visit("000000001").await.unwrap(), 1);
    assert_eq!(repo.record_visit("000000001").await.unwrap(), 2);

    let mut conn = raw_connection().await;
    let raw: u64 = conn.get(visits_key("000000001")).await.unwrap();
    assert_eq!(raw, 2);
    assert_eq!(repo.visit_count("000000001").await.unwrap(), 2);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis server"]
async fn test_list_scans_location_keys_only() {
    let repo = fresh_repository().await;

    assert!(repo.list().await.unwrap().is_empty());

    repo.next_id().await.unwrap();
    repo.save("000000001", "https://a.com").await.unwrap();
    repo.save("000000002", "https://b.com").await.unwrap();
    repo.record_visit("000000001").await.unwrap();

    let listed: HashSet<_> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|StoredRedirect { fragment, original_url }| (fragment, original_url))
        .collect();

    assert_eq!(
        listed,
        HashSet::from([
            ("000000001".to_string(), "https://a.com".to_string()),
            ("000000002".to_string(), "https://b.com".to_string()),
        ])
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
#[ignore = "requires a running Redis server"]
async fn test_concurrent_next_id_is_unique() {
    let repo = Arc::new(fresh_repository().await);
    let mut handles = Vec::new();

    for _ in 0..50 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move { repo.next_id().await.unwrap() }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.unwrap()));
    }
    assert_eq!(ids.len(), 50);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running Redis server"]
async fn test_ping() {
    let repo = fresh_repository().await;
    assert!(repo.ping().await);
}
