//! Integer counters.

use crate::cache::RedisCache;
use redis::AsyncCommands;
use std::time::Duration;
use vesta_core::{DatabaseId, VestaError, VestaResult};

/// Lifetime given to counters touched by [`RedisCache::incr`] and [`RedisCache::decr`].
pub const COUNTER_TTL: Duration = Duration::from_secs(10 * 60 * 60);

/// Lifetime of an id sequence created by [`RedisCache::incr_id`].
pub const ID_SEQUENCE_TTL: Duration = Duration::from_secs(60);

impl RedisCache {
    /// Increments `key` by one and resets its lifetime to [`COUNTER_TTL`].
    pub async fn incr(&self, key: &str, db: DatabaseId) -> VestaResult<i64> {
        self.step_with_ttl(key, 1, db).await
    }

    pub async fn incr_by(&self, key: &str, by: i64, db: DatabaseId) -> VestaResult<i64> {
        let mut conn = self.connection(db).await?;
        Ok(conn.incr(key, by).await?)
    }

    /// Decrements `key` by one and resets its lifetime to [`COUNTER_TTL`].
    pub async fn decr(&self, key: &str, db: DatabaseId) -> VestaResult<i64> {
        self.step_with_ttl(key, -1, db).await
    }

    pub async fn decr_by(&self, key: &str, by: i64, db: DatabaseId) -> VestaResult<i64> {
        let mut conn = self.connection(db).await?;
        Ok(conn.decr(key, by).await?)
    }

    async fn step_with_ttl(&self, key: &str, by: i64, db: DatabaseId) -> VestaResult<i64> {
        let mut conn = self.connection(db).await?;
        let (value,): (i64,) = redis::pipe()
            .atomic()
            .incr(key, by)
            .expire(key, COUNTER_TTL.as_secs() as i64)
            .ignore()
            .query_async(&mut *conn)
            .await?;
        Ok(value)
    }

    /// Returns the next id of a short-lived sequence.
    ///
    /// A fresh sequence starts from the number of keys matching `key` (read
    /// as a pattern). The sequence lives for [`ID_SEQUENCE_TTL`] after each
    /// call.
    pub async fn incr_id(&self, key: &str, step: i64, db: DatabaseId) -> VestaResult<i64> {
        let mut conn = self.connection(db).await?;

        let current: Option<i64> = conn.get(key).await?;
        let base = match current {
            Some(value) => value,
            None => {
                let existing: Vec<String> = conn.keys(key).await?;
                i64::try_from(existing.len()).unwrap_or(i64::MAX)
            }
        };
        let next = next_id(base, step)?;

        let _: () = conn
            .set_ex(key, next, ID_SEQUENCE_TTL.as_secs())
            .await?;

        Ok(next)
    }
}

/// Advances an id sequence by `step`, rejecting results outside `i64`.
fn next_id(current: i64, step: i64) -> VestaResult<i64> {
    current.checked_add(step).ok_or_else(|| {
        VestaError::validation(format!(
            "Id sequence overflow: {} + {} does not fit in a 64-bit integer",
            current, step
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(0, 1).unwrap(), 1);
        assert_eq!(next_id(41, 1).unwrap(), 42);
        assert_eq!(next_id(10, -3).unwrap(), 7);
    }

    #[test]
    fn test_next_id_overflow_is_rejected() {
        let err = next_id(i64::MAX, 1).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let err = next_id(i64::MIN, -1).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }
}
