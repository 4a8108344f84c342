//! Key descriptor repositories.

use crate::XmlElement;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, instrument};
use vesta_core::{DatabaseId, VestaResult};
use vesta_redis::{Expiry, RedisCache};

/// Redis list holding every stored key descriptor.
pub const KEY_LIST: &str = "DataProtection-Keys";

/// Append-only store of XML key descriptors.
#[async_trait]
pub trait XmlRepository: Send + Sync {
    /// Returns every stored element in insertion order.
    async fn get_all_elements(&self) -> VestaResult<Vec<XmlElement>>;

    /// Appends an element. `friendly_name` is informational only.
    async fn store_element(&self, element: &XmlElement, friendly_name: &str) -> VestaResult<()>;
}

/// Repository backed by a Redis list in the admin database.
#[derive(Debug, Clone)]
pub struct RedisXmlRepository {
    cache: RedisCache,
}

impl RedisXmlRepository {
    pub fn new(cache: RedisCache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl XmlRepository for RedisXmlRepository {
    #[instrument(skip(self))]
    async fn get_all_elements(&self) -> VestaResult<Vec<XmlElement>> {
        let raw = self.cache.list_get_all(KEY_LIST, DatabaseId::ADMIN).await?;
        debug!(count = raw.len(), "Loaded key descriptors");

        raw.iter().map(|xml| XmlElement::parse(xml)).collect()
    }

    #[instrument(skip(self, element))]
    async fn store_element(&self, element: &XmlElement, friendly_name: &str) -> VestaResult<()> {
        self.cache
            .list_push_tail(KEY_LIST, element.as_str(), Expiry::Never, DatabaseId::ADMIN)
            .await?;
        debug!(root = element.name(), "Stored key descriptor");
        Ok(())
    }
}

/// Process-local repository. Keys are lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryXmlRepository {
    elements: Arc<RwLock<Vec<XmlElement>>>,
}

impl MemoryXmlRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl XmlRepository for MemoryXmlRepository {
    async fn get_all_elements(&self) -> VestaResult<Vec<XmlElement>> {
        Ok(self.elements.read().clone())
    }

    async fn store_element(&self, element: &XmlElement, _friendly_name: &str) -> VestaResult<()> {
        self.elements.write().push(element.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_repository_keeps_order() {
        let repository = MemoryXmlRepository::new();
        let first = XmlElement::parse(r#"<key id="1"/>"#).unwrap();
        let second = XmlElement::parse(r#"<key id="2"/>"#).unwrap();

        repository.store_element(&first, "key-1").await.unwrap();
        repository.store_element(&second, "key-2").await.unwrap();
        repository.store_element(&first, "key-1").await.unwrap();

        let all = repository.get_all_elements().await.unwrap();
        assert_eq!(all, vec![first.clone(), second, first]);
    }

    #[tokio::test]
    async fn test_memory_repository_starts_empty() {
        let repository = MemoryXmlRepository::new();
        assert!(repository.get_all_elements().await.unwrap().is_empty());
    }
}
