//! Sorted sets.

use crate::cache::{from_json, page_bounds, to_json, RedisCache};
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use vesta_core::{DatabaseId, VestaResult};

impl RedisCache {
    /// Adds `value` as a JSON member with `score`.
    pub async fn sorted_set_add<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        score: f64,
        db: DatabaseId,
    ) -> VestaResult<bool> {
        let json = to_json(value)?;
        self.sorted_set_add_string(key, &json, score, db).await
    }

    /// Adds a raw member, returning whether it was new.
    pub async fn sorted_set_add_string(
        &self,
        key: &str,
        member: &str,
        score: f64,
        db: DatabaseId,
    ) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;
        let added: u64 = conn.zadd(key, member, score).await?;
        Ok(added > 0)
    }

    /// Adds every member with the same `score`.
    pub async fn sorted_set_add_range(
        &self,
        key: &str,
        members: &[String],
        score: f64,
        db: DatabaseId,
    ) -> VestaResult<u64> {
        if members.is_empty() {
            return Ok(0);
        }
        let items: Vec<(f64, &str)> = members.iter().map(|m| (score, m.as_str())).collect();
        let mut conn = self.connection(db).await?;
        Ok(conn.zadd_multiple(key, &items).await?)
    }

    pub async fn sorted_set_remove(&self, key: &str, member: &str, db: DatabaseId) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;
        let removed: u64 = conn.zrem(key, member).await?;
        Ok(removed > 0)
    }

    /// Keeps the `keep` lowest-ranked members and removes the rest.
    pub async fn sorted_set_trim(&self, key: &str, keep: usize, db: DatabaseId) -> VestaResult<u64> {
        let start = isize::try_from(keep).unwrap_or(isize::MAX);
        self.sorted_set_remove_range_by_rank(key, start, -1, db).await
    }

    pub async fn sorted_set_count(&self, key: &str, db: DatabaseId) -> VestaResult<u64> {
        let mut conn = self.connection(db).await?;
        Ok(conn.zcard(key).await?)
    }

    pub async fn sorted_set_contains(&self, key: &str, member: &str, db: DatabaseId) -> VestaResult<bool> {
        Ok(self.sorted_set_score(key, member, db).await?.is_some())
    }

    /// Zero-based rank of `member` by ascending score.
    pub async fn sorted_set_rank(&self, key: &str, member: &str, db: DatabaseId) -> VestaResult<Option<u64>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.zrank(key, member).await?)
    }

    pub async fn sorted_set_score(&self, key: &str, member: &str, db: DatabaseId) -> VestaResult<Option<f64>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.zscore(key, member).await?)
    }

    /// Adds `by` to the score of `member`, returning the new score.
    pub async fn sorted_set_increment(
        &self,
        key: &str,
        member: &str,
        by: f64,
        db: DatabaseId,
    ) -> VestaResult<f64> {
        let mut conn = self.connection(db).await?;
        Ok(conn.zincr(key, member, by).await?)
    }

    /// Members between ranks `from` and `to` inclusive.
    pub async fn sorted_set_range(
        &self,
        key: &str,
        from: isize,
        to: isize,
        descending: bool,
        db: DatabaseId,
    ) -> VestaResult<Vec<String>> {
        let mut conn = self.connection(db).await?;
        let members = if descending {
            conn.zrevrange(key, from, to).await?
        } else {
            conn.zrange(key, from, to).await?
        };
        Ok(members)
    }

    pub async fn sorted_set_range_with_scores(
        &self,
        key: &str,
        from: isize,
        to: isize,
        descending: bool,
        db: DatabaseId,
    ) -> VestaResult<Vec<(String, f64)>> {
        let mut conn = self.connection(db).await?;
        let members = if descending {
            conn.zrevrange_withscores(key, from, to).await?
        } else {
            conn.zrange_withscores(key, from, to).await?
        };
        Ok(members)
    }

    /// Members whose score lies in `min..=max`, lowest first.
    pub async fn sorted_set_range_by_score(
        &self,
        key: &str,
        min: f64,
        max: f64,
        db: DatabaseId,
    ) -> VestaResult<Vec<String>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.zrangebyscore(key, min, max).await?)
    }

    /// One page of JSON members by ascending score. Pages are 1-based.
    pub async fn sorted_set_page<T: DeserializeOwned>(
        &self,
        key: &str,
        page_index: usize,
        page_size: usize,
        db: DatabaseId,
    ) -> VestaResult<Vec<T>> {
        let Some((start, stop)) = page_bounds(page_index, page_size) else {
            return Ok(Vec::new());
        };
        self.sorted_set_range(key, start, stop, false, db)
            .await?
            .iter()
            .map(|member| from_json(member))
            .collect()
    }

    /// Every JSON member by ascending score.
    pub async fn sorted_set_all<T: DeserializeOwned>(&self, key: &str, db: DatabaseId) -> VestaResult<Vec<T>> {
        self.sorted_set_range(key, 0, -1, false, db)
            .await?
            .iter()
            .map(|member| from_json(member))
            .collect()
    }

    /// Removes and returns the member with the lowest score.
    pub async fn sorted_set_pop_min(&self, key: &str, db: DatabaseId) -> VestaResult<Option<(String, f64)>> {
        let mut conn = self.connection(db).await?;
        let popped: Vec<(String, f64)> = conn.zpopmin(key, 1).await?;
        Ok(popped.into_iter().next())
    }

    /// Removes and returns the member with the highest score.
    pub async fn sorted_set_pop_max(&self, key: &str, db: DatabaseId) -> VestaResult<Option<(String, f64)>> {
        let mut conn = self.connection(db).await?;
        let popped: Vec<(String, f64)> = conn.zpopmax(key, 1).await?;
        Ok(popped.into_iter().next())
    }

    pub async fn sorted_set_remove_range_by_rank(
        &self,
        key: &str,
        start: isize,
        stop: isize,
        db: DatabaseId,
    ) -> VestaResult<u64> {
        let mut conn = self.connection(db).await?;
        Ok(conn.zremrangebyrank(key, start, stop).await?)
    }

    pub async fn sorted_set_remove_range_by_score(
        &self,
        key: &str,
        min: f64,
        max: f64,
        db: DatabaseId,
    ) -> VestaResult<u64> {
        let mut conn = self.connection(db).await?;
        Ok(conn.zrembyscore(key, min, max).await?)
    }

    /// Stores the union of `keys` into `destination`, returning its size.
    pub async fn sorted_set_store_union(
        &self,
        destination: &str,
        keys: &[&str],
        db: DatabaseId,
    ) -> VestaResult<u64> {
        let mut conn = self.connection(db).await?;
        Ok(conn.zunionstore(destination, keys).await?)
    }

    /// Stores the intersection of `keys` into `destination`, returning its size.
    pub async fn sorted_set_store_intersect(
        &self,
        destination: &str,
        keys: &[&str],
        db: DatabaseId,
    ) -> VestaResult<u64> {
        let mut conn = self.connection(db).await?;
        Ok(conn.zinterstore(destination, keys).await?)
    }
}
