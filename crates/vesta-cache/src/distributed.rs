//! Distributed cache contract.

use crate::CacheEntryOptions;
use async_trait::async_trait;
use vesta_core::{VestaError, VestaResult};

/// Byte-oriented cache shared between processes.
///
/// Missing keys are never errors. Store failures propagate unchanged.
#[async_trait]
pub trait DistributedCache: Send + Sync {
    /// Reads the value for `key`.
    ///
    /// A read counts as an access: the sliding expiration is re-applied.
    async fn get(&self, key: &str) -> VestaResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// When both sliding and absolute expiration are set, whichever comes
    /// first applies.
    async fn set(&self, key: &str, value: &[u8], options: &CacheEntryOptions) -> VestaResult<()>;

    /// Deletes `key`. Deleting a missing key succeeds.
    async fn remove(&self, key: &str) -> VestaResult<()>;

    /// Re-applies the sliding expiration without reading the value.
    async fn refresh(&self, key: &str) -> VestaResult<()>;
}

/// String and JSON helpers available on every [`DistributedCache`].
#[async_trait]
pub trait DistributedCacheExt: DistributedCache {
    /// Reads a UTF-8 value.
    async fn get_string(&self, key: &str) -> VestaResult<Option<String>> {
        match self.get(key).await? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| VestaError::validation(format!("Cached value is not UTF-8: {}", e))),
            None => Ok(None),
        }
    }

    /// Stores a UTF-8 value.
    async fn set_string(&self, key: &str, value: &str, options: &CacheEntryOptions) -> VestaResult<()> {
        self.set(key, value.as_bytes(), options).await
    }

    /// Reads a JSON value.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> VestaResult<Option<T>> {
        match self.get(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Stores a value as JSON.
    async fn set_json<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        options: &CacheEntryOptions,
    ) -> VestaResult<()> {
        let json = serde_json::to_vec(value)?;
        self.set(key, &json, options).await
    }
}

impl<T: DistributedCache + ?Sized> DistributedCacheExt for T {}

#[async_trait]
impl<T: DistributedCache + ?Sized> DistributedCache for std::sync::Arc<T> {
    async fn get(&self, key: &str) -> VestaResult<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &[u8], options: &CacheEntryOptions) -> VestaResult<()> {
        (**self).set(key, value, options).await
    }

    async fn remove(&self, key: &str) -> VestaResult<()> {
        (**self).remove(key).await
    }

    async fn refresh(&self, key: &str) -> VestaResult<()> {
        (**self).refresh(key).await
    }
}
