//! Integration tests for RedisTicketStore on Redis.
//!
//! These tests run against a real Redis server using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use chrono::{Duration, Utc};
use common::TestRedis;
use vesta_auth::claims::{ACCOUNT_ID, REPEAT_LOGIN};
use vesta_auth::{
    AuthenticationProperties, AuthenticationTicket, ClaimsIdentity, ClaimsPrincipal,
    RedisTicketStore, TicketStore,
};
use vesta_cache::RedisDistributedCache;
use vesta_core::DatabaseId;

fn login(account: &str, repeat_login: &str) -> AuthenticationTicket {
    AuthenticationTicket::new(
        ClaimsPrincipal::new(
            ClaimsIdentity::new("Cookies")
                .with_claim(ACCOUNT_ID, account)
                .with_claim(REPEAT_LOGIN, repeat_login),
        ),
        AuthenticationProperties::default().with_expires_utc(Utc::now() + Duration::minutes(30)),
        "Cookies",
    )
}

#[tokio::test]
async fn test_single_session_on_redis() {
    let redis = TestRedis::new().await;
    let facade = redis.cache();
    let store = RedisTicketStore::new(RedisDistributedCache::new(facade.clone()));

    let first = store.store(login("A", "false")).await.unwrap();
    let second = store.store(login("A", "false")).await.unwrap();

    assert!(store.retrieve(&first).await.unwrap().is_none());
    assert!(store.retrieve(&second).await.unwrap().is_some());
    assert!(!facade.exists(&first, DatabaseId::DEFAULT).await.unwrap());

    let ttl = facade
        .time_to_live(&second, DatabaseId::DEFAULT)
        .await
        .unwrap()
        .unwrap();
    assert!(ttl <= std::time::Duration::from_secs(30 * 60));
}

#[tokio::test]
async fn test_repeat_login_on_redis() {
    let redis = TestRedis::new().await;
    let store = RedisTicketStore::new(RedisDistributedCache::new(redis.cache()));

    let first = store.store(login("B", "True")).await.unwrap();
    let second = store.store(login("B", "True")).await.unwrap();

    assert!(store.retrieve(&first).await.unwrap().is_some());
    assert!(store.retrieve(&second).await.unwrap().is_some());

    store.remove(&first).await.unwrap();
    assert!(store.retrieve(&first).await.unwrap().is_none());
}
