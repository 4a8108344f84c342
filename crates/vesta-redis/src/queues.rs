//! FIFO queues on top of lists.
//!
//! Items are enqueued at the head and dequeued from the tail.

use crate::cache::RedisCache;
use crate::lists::ItemRef;
use crate::Expiry;
use std::time::Duration;
use tracing::debug;
use vesta_core::{DatabaseId, VestaResult};

impl RedisCache {
    pub async fn enqueue(&self, key: &str, value: &str, db: DatabaseId) -> VestaResult<i64> {
        let len = self.list_push_head(key, value, Expiry::Never, db).await?;
        debug!(queue = %key, len, "Enqueued item");
        Ok(len)
    }

    pub async fn dequeue(&self, key: &str, db: DatabaseId) -> VestaResult<Option<String>> {
        self.list_pop_tail(key, db).await
    }

    /// Dequeues from `key`, waiting up to `timeout` for an item.
    ///
    /// Returns `None` when the timeout elapses. A zero timeout waits
    /// indefinitely.
    pub async fn blocking_dequeue(
        &self,
        key: &str,
        timeout: Duration,
        db: DatabaseId,
    ) -> VestaResult<Option<String>> {
        let popped = self.list_blocking_pop_tail(&[key], timeout, db).await?;
        Ok(popped.map(|item| item.item))
    }

    /// Dequeues from the first non-empty queue in `keys`.
    pub async fn blocking_dequeue_any(
        &self,
        keys: &[&str],
        timeout: Duration,
        db: DatabaseId,
    ) -> VestaResult<Option<ItemRef>> {
        self.list_blocking_pop_tail(keys, timeout, db).await
    }
}
