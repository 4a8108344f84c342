//! Integration tests for RedisXmlRepository.
//!
//! Requires Docker to be available on the system.

mod common;

use common::TestRedis;
use vesta_core::DatabaseId;
use vesta_dataprotection::{
    KeyManagementOptions, RedisXmlRepository, XmlElement, XmlRepository, KEY_LIST,
};
use vesta_redis::Expiry;

fn key(id: &str) -> XmlElement {
    XmlElement::parse(&format!(
        "<key id=\"{}\">\n  <creationDate>2024-01-01T00:00:00Z</creationDate>\n</key>",
        id
    ))
    .unwrap()
}

#[tokio::test]
async fn test_empty_repository() {
    let redis = TestRedis::new().await;
    let repository = RedisXmlRepository::new(redis.cache());

    assert!(repository.get_all_elements().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_elements_are_appended_to_admin_list() {
    let redis = TestRedis::new().await;
    let facade = redis.cache();
    let repository = RedisXmlRepository::new(facade.clone());

    repository.store_element(&key("a"), "key-a").await.unwrap();
    repository.store_element(&key("b"), "key-b").await.unwrap();

    let all = repository.get_all_elements().await.unwrap();
    assert_eq!(all, vec![key("a"), key("b")]);

    let raw = facade.list_get_all(KEY_LIST, DatabaseId::ADMIN).await.unwrap();
    assert_eq!(
        raw[0],
        "<key id=\"a\"><creationDate>2024-01-01T00:00:00Z</creationDate></key>"
    );
    assert_eq!(facade.list_count(KEY_LIST, DatabaseId::DEFAULT).await.unwrap(), 0);
}

#[tokio::test]
async fn test_storing_same_element_twice_keeps_both() {
    let redis = TestRedis::new().await;
    let repository = RedisXmlRepository::new(redis.cache());

    repository.store_element(&key("a"), "key-a").await.unwrap();
    repository.store_element(&key("a"), "key-a").await.unwrap();

    assert_eq!(repository.get_all_elements().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_malformed_entry_fails_read() {
    let redis = TestRedis::new().await;
    let facade = redis.cache();
    let repository = RedisXmlRepository::new(facade.clone());

    repository.store_element(&key("a"), "key-a").await.unwrap();
    facade
        .list_push_tail(KEY_LIST, "<broken", Expiry::Never, DatabaseId::ADMIN)
        .await
        .unwrap();

    let err = repository.get_all_elements().await.unwrap_err();
    assert_eq!(err.error_code(), "XML_ERROR");
}

#[tokio::test]
async fn test_options_share_the_store() {
    let redis = TestRedis::new().await;
    let writer = KeyManagementOptions::new("app").persist_keys_to_distributed_store(redis.cache());
    let reader = KeyManagementOptions::new("app").persist_keys_to_distributed_store(redis.cache());

    writer
        .xml_repository()
        .unwrap()
        .store_element(&key("shared"), "shared")
        .await
        .unwrap();

    let seen = reader.xml_repository().unwrap().get_all_elements().await.unwrap();
    assert_eq!(seen, vec![key("shared")]);
}
