//! Integration tests for RedisDistributedCache.
//!
//! These tests run against a real Redis server using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use common::TestRedis;
use std::time::Duration;
use vesta_cache::{CacheEntryOptions, DistributedCache, DistributedCacheExt, RedisDistributedCache};
use vesta_core::DatabaseId;

#[tokio::test]
async fn test_set_get_remove() {
    let redis = TestRedis::new().await;
    let cache = RedisDistributedCache::new(redis.cache());

    cache.set("k", b"value", &CacheEntryOptions::new()).await.unwrap();
    assert_eq!(cache.get("k").await.unwrap(), Some(b"value".to_vec()));

    cache.remove("k").await.unwrap();
    assert_eq!(cache.get("k").await.unwrap(), None);

    cache.remove("k").await.unwrap();
}

#[tokio::test]
async fn test_entry_is_stored_as_hash_in_default_database() {
    let redis = TestRedis::new().await;
    let facade = redis.cache();
    let cache = RedisDistributedCache::new(facade.clone());

    let options = CacheEntryOptions::new().set_sliding_expiration(Duration::from_secs(20));
    cache.set_string("k", "hello", &options).await.unwrap();

    let fields = facade.hash_get_all_entries("k", DatabaseId::DEFAULT).await.unwrap();
    assert_eq!(fields.get("data").map(String::as_str), Some("hello"));
    assert_eq!(fields.get("sldexp").map(String::as_str), Some("20"));
    assert_eq!(fields.get("absexp").map(String::as_str), Some("-1"));

    assert!(!facade.exists("k", DatabaseId::ADMIN).await.unwrap());
}

#[tokio::test]
async fn test_no_options_sets_no_ttl() {
    let redis = TestRedis::new().await;
    let facade = redis.cache();
    let cache = RedisDistributedCache::new(facade.clone());

    cache
        .set("k", b"v", &CacheEntryOptions::new().set_absolute_expiration_in(Duration::from_secs(60)))
        .await
        .unwrap();
    cache.set("k", b"v", &CacheEntryOptions::new()).await.unwrap();

    assert!(facade.time_to_live("k", DatabaseId::DEFAULT).await.unwrap().is_none());
}

#[tokio::test]
async fn test_absolute_caps_sliding() {
    let redis = TestRedis::new().await;
    let facade = redis.cache();
    let cache = RedisDistributedCache::new(facade.clone());

    let options = CacheEntryOptions::new()
        .set_sliding_expiration(Duration::from_secs(300))
        .set_absolute_expiration_in(Duration::from_secs(30));
    cache.set("k", b"v", &options).await.unwrap();
    cache.get("k").await.unwrap();

    let ttl = facade.time_to_live("k", DatabaseId::DEFAULT).await.unwrap().unwrap();
    assert!(ttl <= Duration::from_secs(30));
}

#[tokio::test]
async fn test_refresh_extends_sliding_window() {
    let redis = TestRedis::new().await;
    let facade = redis.cache();
    let cache = RedisDistributedCache::new(facade.clone());

    let options = CacheEntryOptions::new().set_sliding_expiration(Duration::from_secs(2));
    cache.set("k", b"v", &options).await.unwrap();

    for _ in 0..3 {
        tokio::time::sleep(Duration::from_millis(1200)).await;
        cache.refresh("k").await.unwrap();
    }

    assert_eq!(cache.get("k").await.unwrap(), Some(b"v".to_vec()));

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(cache.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn test_refresh_missing_key_is_noop() {
    let redis = TestRedis::new().await;
    let facade = redis.cache();
    let cache = RedisDistributedCache::new(facade.clone());

    cache.refresh("missing").await.unwrap();

    assert!(!facade.exists("missing", DatabaseId::DEFAULT).await.unwrap());
}

#[tokio::test]
async fn test_past_absolute_expiration_is_rejected() {
    let redis = TestRedis::new().await;
    let facade = redis.cache();
    let cache = RedisDistributedCache::new(facade.clone());

    let options =
        CacheEntryOptions::new().set_absolute_expiration(chrono::Utc::now() - chrono::Duration::minutes(1));

    let err = cache.set("k", b"v", &options).await.unwrap_err();

    assert_eq!(err.error_code(), "VALIDATION_ERROR");
    assert!(!facade.exists("k", DatabaseId::DEFAULT).await.unwrap());
}

#[tokio::test]
async fn test_json_helpers() {
    let redis = TestRedis::new().await;
    let cache = RedisDistributedCache::new(redis.cache());

    cache
        .set_json("numbers", &vec![1, 2, 3], &CacheEntryOptions::new())
        .await
        .unwrap();

    let numbers: Option<Vec<i32>> = cache.get_json("numbers").await.unwrap();
    assert_eq!(numbers, Some(vec![1, 2, 3]));
}
