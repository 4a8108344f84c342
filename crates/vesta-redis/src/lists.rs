//! Lists, including blocking pops.

use crate::cache::{from_json, page_bounds, to_json, RedisCache};
use crate::Expiry;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use vesta_core::{DatabaseId, VestaResult};

/// An item popped from one of several lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    /// Key of the list the item came from.
    pub id: String,
    /// The popped value.
    pub item: String,
}

impl From<(String, String)> for ItemRef {
    fn from((id, item): (String, String)) -> Self {
        Self { id, item }
    }
}

/// Blocking timeout in the seconds format `BLPOP` expects.
pub(crate) fn timeout_secs(timeout: Duration) -> f64 {
    timeout.as_secs_f64()
}

impl RedisCache {
    /// Pushes `value` at the head of the list.
    pub async fn list_push_head(
        &self,
        key: &str,
        value: &str,
        expiry: Expiry,
        db: DatabaseId,
    ) -> VestaResult<i64> {
        self.list_push("LPUSH", key, value, expiry, db).await
    }

    /// Pushes `value` at the tail of the list.
    pub async fn list_push_tail(
        &self,
        key: &str,
        value: &str,
        expiry: Expiry,
        db: DatabaseId,
    ) -> VestaResult<i64> {
        self.list_push("RPUSH", key, value, expiry, db).await
    }

    async fn list_push(
        &self,
        command: &str,
        key: &str,
        value: &str,
        expiry: Expiry,
        db: DatabaseId,
    ) -> VestaResult<i64> {
        let mut conn = self.connection(db).await?;

        let mut pipe = redis::pipe();
        pipe.atomic().cmd(command).arg(key).arg(value);
        expiry.apply_to_key(&mut pipe, key);

        let (len,): (i64,) = pipe.query_async(&mut *conn).await?;
        Ok(len)
    }

    /// Appends every value at the tail of the list.
    pub async fn list_add_range(&self, key: &str, values: &[String], db: DatabaseId) -> VestaResult<()> {
        if values.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection(db).await?;
        let _: () = conn.rpush(key, values).await?;
        Ok(())
    }

    /// Appends `value` as JSON at the tail of the list.
    pub async fn list_add<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        db: DatabaseId,
    ) -> VestaResult<i64> {
        let json = to_json(value)?;
        self.list_push_tail(key, &json, Expiry::Never, db).await
    }

    /// Reads every list item as JSON.
    pub async fn list_get<T: DeserializeOwned>(&self, key: &str, db: DatabaseId) -> VestaResult<Vec<T>> {
        self.list_get_all(key, db)
            .await?
            .iter()
            .map(|item| from_json(item))
            .collect()
    }

    pub async fn list_get_all(&self, key: &str, db: DatabaseId) -> VestaResult<Vec<String>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.lrange(key, 0, -1).await?)
    }

    /// Reads `count` items starting at index `start`.
    pub async fn list_get_range(
        &self,
        key: &str,
        start: isize,
        count: usize,
        db: DatabaseId,
    ) -> VestaResult<Vec<String>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let stop = start.saturating_add(isize::try_from(count - 1).unwrap_or(isize::MAX));
        let mut conn = self.connection(db).await?;
        Ok(conn.lrange(key, start, stop).await?)
    }

    /// Reads one page of the list. Pages are 1-based.
    pub async fn list_get_page(
        &self,
        key: &str,
        page_index: usize,
        page_size: usize,
        db: DatabaseId,
    ) -> VestaResult<Vec<String>> {
        let Some((start, stop)) = page_bounds(page_index, page_size) else {
            return Ok(Vec::new());
        };
        let mut conn = self.connection(db).await?;
        Ok(conn.lrange(key, start, stop).await?)
    }

    pub async fn list_count(&self, key: &str, db: DatabaseId) -> VestaResult<u64> {
        let mut conn = self.connection(db).await?;
        Ok(conn.llen(key).await?)
    }

    /// Removes every occurrence of `value`, returning how many were removed.
    pub async fn list_remove_item(&self, key: &str, value: &str, db: DatabaseId) -> VestaResult<i64> {
        let mut conn = self.connection(db).await?;
        Ok(conn.lrem(key, 0, value).await?)
    }

    /// Deletes the whole list.
    pub async fn list_remove_all(&self, key: &str, db: DatabaseId) -> VestaResult<bool> {
        self.remove(key, db).await
    }

    pub async fn list_pop_head(&self, key: &str, db: DatabaseId) -> VestaResult<Option<String>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.lpop(key, None).await?)
    }

    pub async fn list_pop_tail(&self, key: &str, db: DatabaseId) -> VestaResult<Option<String>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.rpop(key, None).await?)
    }

    /// Moves the tail of `from` to the head of `to`.
    pub async fn list_pop_and_push(&self, from: &str, to: &str, db: DatabaseId) -> VestaResult<Option<String>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.rpoplpush(from, to).await?)
    }

    /// Pops the head of the first non-empty list, waiting up to `timeout`.
    pub async fn list_blocking_pop_head(
        &self,
        keys: &[&str],
        timeout: Duration,
        db: DatabaseId,
    ) -> VestaResult<Option<ItemRef>> {
        let mut conn = self.connection(db).await?;
        let popped: Option<(String, String)> = conn.blpop(keys, timeout_secs(timeout)).await?;
        Ok(popped.map(ItemRef::from))
    }

    /// Pops the tail of the first non-empty list, waiting up to `timeout`.
    pub async fn list_blocking_pop_tail(
        &self,
        keys: &[&str],
        timeout: Duration,
        db: DatabaseId,
    ) -> VestaResult<Option<ItemRef>> {
        let mut conn = self.connection(db).await?;
        let popped: Option<(String, String)> = conn.brpop(keys, timeout_secs(timeout)).await?;
        Ok(popped.map(ItemRef::from))
    }

    /// Moves the tail of `from` to the head of `to`, waiting up to `timeout`.
    pub async fn list_blocking_pop_and_push(
        &self,
        from: &str,
        to: &str,
        timeout: Duration,
        db: DatabaseId,
    ) -> VestaResult<Option<String>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.brpoplpush(from, to, timeout_secs(timeout)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_ref_from_pair() {
        let item = ItemRef::from(("jobs".to_string(), "42".to_string()));
        assert_eq!(item.id, "jobs");
        assert_eq!(item.item, "42");
    }

    #[test]
    fn test_timeout_keeps_fractions() {
        assert!((timeout_secs(Duration::from_millis(250)) - 0.25).abs() < f64::EPSILON);
    }
}
