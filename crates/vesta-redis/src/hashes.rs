//! Hash fields.

use crate::cache::{from_json, from_json_opt, to_json, RedisCache};
use crate::Expiry;
use redis::{AsyncCommands, ToRedisArgs};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use vesta_core::{DatabaseId, VestaResult};

impl RedisCache {
    /// Stores `value` as JSON in `field`, returning whether the field was new.
    pub async fn hash_set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        field: &str,
        value: &T,
        db: DatabaseId,
    ) -> VestaResult<bool> {
        let json = to_json(value)?;
        let mut conn = self.connection(db).await?;
        let created: u64 = conn.hset(key, field, json).await?;
        Ok(created > 0)
    }

    pub async fn hash_set_if_not_exists(
        &self,
        key: &str,
        field: &str,
        value: &str,
        db: DatabaseId,
    ) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;
        Ok(conn.hset_nx(key, field, value).await?)
    }

    /// Writes several raw fields at once.
    pub async fn hash_set_range(
        &self,
        key: &str,
        entries: &[(String, String)],
        db: DatabaseId,
    ) -> VestaResult<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection(db).await?;
        let _: () = conn.hset_multiple(key, entries).await?;
        Ok(())
    }

    /// Replaces the whole hash and applies `expiry`, in one transaction.
    ///
    /// Fields left over from a previous value and any previous expiration
    /// are discarded.
    pub async fn hash_replace<V>(
        &self,
        key: &str,
        entries: &[(&str, V)],
        expiry: Expiry,
        db: DatabaseId,
    ) -> VestaResult<()>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection(db).await?;

        let mut pipe = redis::pipe();
        pipe.atomic().del(key).ignore();
        if !entries.is_empty() {
            pipe.hset_multiple(key, entries).ignore();
        }
        expiry.apply_to_key(&mut pipe, key);

        let _: () = pipe.query_async(&mut *conn).await?;
        Ok(())
    }

    /// Reads several fields as raw bytes; missing fields come back as `None`.
    pub async fn hash_get_raw_values(
        &self,
        key: &str,
        fields: &[&str],
        db: DatabaseId,
    ) -> VestaResult<Vec<Option<Vec<u8>>>> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.connection(db).await?;
        let values: Vec<Option<Vec<u8>>> = redis::cmd("HMGET")
            .arg(key)
            .arg(fields)
            .query_async(&mut *conn)
            .await?;
        Ok(values)
    }

    /// Reads a JSON field.
    pub async fn hash_get<T: DeserializeOwned>(
        &self,
        key: &str,
        field: &str,
        db: DatabaseId,
    ) -> VestaResult<Option<T>> {
        let raw = self.hash_get_string(key, field, db).await?;
        from_json_opt(raw)
    }

    pub async fn hash_get_string(&self, key: &str, field: &str, db: DatabaseId) -> VestaResult<Option<String>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.hget(key, field).await?)
    }

    /// Reads several fields; missing fields come back as `None`.
    pub async fn hash_get_values_for(
        &self,
        key: &str,
        fields: &[&str],
        db: DatabaseId,
    ) -> VestaResult<Vec<Option<String>>> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.connection(db).await?;
        let values: Vec<Option<String>> = redis::cmd("HMGET")
            .arg(key)
            .arg(fields)
            .query_async(&mut *conn)
            .await?;
        Ok(values)
    }

    pub async fn hash_get_all_entries(&self, key: &str, db: DatabaseId) -> VestaResult<HashMap<String, String>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.hgetall(key).await?)
    }

    /// Reads every field as JSON.
    pub async fn hash_get_all<T: DeserializeOwned>(
        &self,
        key: &str,
        db: DatabaseId,
    ) -> VestaResult<HashMap<String, T>> {
        self.hash_get_all_entries(key, db)
            .await?
            .into_iter()
            .map(|(field, raw)| Ok((field, from_json(&raw)?)))
            .collect()
    }

    pub async fn hash_keys(&self, key: &str, db: DatabaseId) -> VestaResult<Vec<String>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.hkeys(key).await?)
    }

    pub async fn hash_values(&self, key: &str, db: DatabaseId) -> VestaResult<Vec<String>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.hvals(key).await?)
    }

    pub async fn hash_count(&self, key: &str, db: DatabaseId) -> VestaResult<u64> {
        let mut conn = self.connection(db).await?;
        Ok(conn.hlen(key).await?)
    }

    pub async fn hash_exists(&self, key: &str, field: &str, db: DatabaseId) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;
        Ok(conn.hexists(key, field).await?)
    }

    pub async fn hash_remove_field(&self, key: &str, field: &str, db: DatabaseId) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;
        let removed: u64 = conn.hdel(key, field).await?;
        Ok(removed > 0)
    }

    /// Deletes the whole hash.
    pub async fn hash_remove(&self, key: &str, db: DatabaseId) -> VestaResult<bool> {
        self.remove(key, db).await
    }

    /// Adds `by` to a numeric field, returning the new value.
    pub async fn hash_increment(&self, key: &str, field: &str, by: f64, db: DatabaseId) -> VestaResult<f64> {
        let mut conn = self.connection(db).await?;
        let value: f64 = redis::cmd("HINCRBYFLOAT")
            .arg(key)
            .arg(field)
            .arg(by)
            .query_async(&mut *conn)
            .await?;
        Ok(value)
    }
}
