//! String items and key management.

use crate::cache::{from_json_opt, to_json, RedisCache};
use crate::Expiry;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use vesta_core::{DatabaseId, VestaResult};

impl RedisCache {
    /// Stores `value` as JSON under `key`.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        expiry: Expiry,
        db: DatabaseId,
    ) -> VestaResult<bool> {
        let json = to_json(value)?;
        self.set_string_with(key, &json, expiry, db).await
    }

    /// Stores a raw string under `key`.
    pub async fn set_string(
        &self,
        key: &str,
        value: &str,
        expiry: Expiry,
        db: DatabaseId,
    ) -> VestaResult<bool> {
        self.set_string_with(key, value, expiry, db).await
    }

    async fn set_string_with(
        &self,
        key: &str,
        value: &str,
        expiry: Expiry,
        db: DatabaseId,
    ) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;

        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        expiry.apply_to_set(&mut cmd);
        let reply: redis::Value = cmd.query_async(&mut *conn).await?;

        debug!(key = %key, db = %db, ?expiry, "Stored item");
        Ok(!matches!(reply, redis::Value::Nil))
    }

    /// Stores `value` only when `key` does not exist yet.
    pub async fn set_if_not_exists(&self, key: &str, value: &str, db: DatabaseId) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;
        Ok(conn.set_nx(key, value).await?)
    }

    /// Reads a JSON value.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, db: DatabaseId) -> VestaResult<Option<T>> {
        let raw = self.get_string(key, db).await?;
        from_json_opt(raw)
    }

    /// Reads a raw string.
    pub async fn get_string(&self, key: &str, db: DatabaseId) -> VestaResult<Option<String>> {
        let mut conn = self.connection(db).await?;
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(_) => debug!(key = %key, db = %db, "Cache hit"),
            None => debug!(key = %key, db = %db, "Cache miss"),
        }

        Ok(value)
    }

    pub async fn exists(&self, key: &str, db: DatabaseId) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;
        Ok(conn.exists(key).await?)
    }

    /// Deletes `key`, returning whether it existed.
    pub async fn remove(&self, key: &str, db: DatabaseId) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;
        let removed: u64 = conn.del(key).await?;
        Ok(removed > 0)
    }

    /// Deletes every key in `db`.
    pub async fn remove_all(&self, db: DatabaseId) -> VestaResult<()> {
        let mut conn = self.connection(db).await?;
        redis::cmd("FLUSHDB").query_async::<()>(&mut *conn).await?;
        debug!(db = %db, "Flushed database");
        Ok(())
    }

    /// Deletes every key matching `pattern`.
    ///
    /// Keys are collected with `SCAN` in pages of `page_size` and then
    /// removed in a single transaction. Returns the number of keys deleted.
    pub async fn remove_by_pattern(
        &self,
        pattern: &str,
        page_size: usize,
        db: DatabaseId,
    ) -> VestaResult<u64> {
        let mut conn = self.connection(db).await?;

        let mut keys: Vec<String> = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(page_size.max(1))
                .query_async(&mut *conn)
                .await?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        if keys.is_empty() {
            return Ok(0);
        }

        let mut pipe = redis::pipe();
        pipe.atomic();
        for key in &keys {
            pipe.del(key);
        }
        let removed: Vec<u64> = pipe.query_async(&mut *conn).await?;
        let removed = removed.into_iter().sum();

        debug!(pattern = %pattern, db = %db, removed, "Removed keys by pattern");
        Ok(removed)
    }

    /// Lists keys matching `pattern`.
    pub async fn search_keys(&self, pattern: &str, db: DatabaseId) -> VestaResult<Vec<String>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.keys(pattern).await?)
    }

    /// Sets an absolute expiration on `key`.
    pub async fn expire_at(&self, key: &str, at: DateTime<Utc>, db: DatabaseId) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;
        let applied: bool = redis::cmd("PEXPIREAT")
            .arg(key)
            .arg(at.timestamp_millis())
            .query_async(&mut *conn)
            .await?;
        Ok(applied)
    }

    /// Sets a relative expiration on `key`.
    pub async fn expire_in(&self, key: &str, ttl: Duration, db: DatabaseId) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;
        let applied: bool = redis::cmd("PEXPIRE")
            .arg(key)
            .arg(crate::expiry::millis(ttl))
            .query_async(&mut *conn)
            .await?;
        Ok(applied)
    }

    /// Removes any expiration from `key`.
    pub async fn persist(&self, key: &str, db: DatabaseId) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;
        Ok(conn.persist(key).await?)
    }

    /// Remaining time to live, `None` when the key is missing or has none.
    pub async fn time_to_live(&self, key: &str, db: DatabaseId) -> VestaResult<Option<Duration>> {
        let mut conn = self.connection(db).await?;
        let ms: i64 = conn.pttl(key).await?;
        Ok(u64::try_from(ms).ok().map(Duration::from_millis))
    }

    pub async fn string_length(&self, key: &str, db: DatabaseId) -> VestaResult<u64> {
        let mut conn = self.connection(db).await?;
        Ok(conn.strlen(key).await?)
    }
}
