//! Redis-backed distributed cache.
//!
//! Each entry is a hash with three fields: `data` holds the value, `sldexp`
//! the sliding expiration in seconds and `absexp` the absolute expiration as
//! unix seconds. Unset expirations are stored as `-1`.

use crate::{CacheEntry, CacheEntryOptions, DistributedCache};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::debug;
use vesta_core::{DatabaseId, VestaResult};
use vesta_redis::{Expiry, RedisCache};

const DATA_FIELD: &str = "data";
const SLIDING_FIELD: &str = "sldexp";
const ABSOLUTE_FIELD: &str = "absexp";
const NOT_PRESENT: i64 = -1;

/// [`DistributedCache`] stored in [`DatabaseId::DEFAULT`].
#[derive(Debug, Clone)]
pub struct RedisDistributedCache {
    cache: RedisCache,
}

impl RedisDistributedCache {
    pub fn new(cache: RedisCache) -> Self {
        Self { cache }
    }

    /// Returns the underlying facade.
    pub fn inner(&self) -> &RedisCache {
        &self.cache
    }

    const fn db() -> DatabaseId {
        DatabaseId::DEFAULT
    }

    /// Reads the expiration metadata and, optionally, the value.
    async fn read(&self, key: &str, with_data: bool) -> VestaResult<Option<StoredFields>> {
        let fields: &[&str] = if with_data {
            &[ABSOLUTE_FIELD, SLIDING_FIELD, DATA_FIELD]
        } else {
            &[ABSOLUTE_FIELD, SLIDING_FIELD]
        };

        let mut values = self
            .cache
            .hash_get_raw_values(key, fields, Self::db())
            .await?
            .into_iter();

        let absolute = parse_seconds(values.next().flatten());
        let sliding = parse_seconds(values.next().flatten());
        let data = values.next().flatten();

        if with_data && data.is_none() {
            return Ok(None);
        }
        if !with_data && absolute.is_none() && sliding.is_none() {
            return Ok(None);
        }

        Ok(Some(StoredFields {
            absolute: absolute.filter(|s| *s != NOT_PRESENT),
            sliding: sliding.filter(|s| *s != NOT_PRESENT),
            data,
        }))
    }

    /// Re-applies the sliding window to an entry that was just read.
    async fn slide(&self, key: &str, fields: &StoredFields) -> VestaResult<()> {
        let Some(sliding) = fields.sliding else {
            return Ok(());
        };

        let mut ttl = Duration::from_secs(u64::try_from(sliding).unwrap_or(0));
        if let Some(absolute) = fields.absolute {
            let remaining = absolute - Utc::now().timestamp();
            let Ok(remaining) = u64::try_from(remaining) else {
                return Ok(());
            };
            ttl = ttl.min(Duration::from_secs(remaining));
        }

        if !ttl.is_zero() {
            self.cache.expire_in(key, ttl, Self::db()).await?;
        }
        Ok(())
    }
}

#[derive(Debug)]
struct StoredFields {
    absolute: Option<i64>,
    sliding: Option<i64>,
    data: Option<Vec<u8>>,
}

fn parse_seconds(raw: Option<Vec<u8>>) -> Option<i64> {
    raw.and_then(|bytes| std::str::from_utf8(&bytes).ok()?.trim().parse().ok())
}

/// Sliding windows are stored with whole-second resolution.
fn whole_seconds(d: Duration) -> u64 {
    let secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

/// Redis hash fields for an entry written at `now`, plus the key's TTL.
fn to_fields(entry: &CacheEntry, now: DateTime<Utc>) -> (Vec<(&'static str, Vec<u8>)>, Expiry) {
    let sliding = entry.sliding_expiration.map(whole_seconds);
    let absolute = entry.absolute_expiration.map(|at| at.timestamp());

    let stored = CacheEntry {
        value: Vec::new(),
        sliding_expiration: sliding.map(Duration::from_secs),
        absolute_expiration: entry.absolute_expiration,
    };
    let expiry = stored
        .time_to_live(now)
        .map_or(Expiry::Never, Expiry::In);

    let seconds = |v: Option<i64>| v.unwrap_or(NOT_PRESENT).to_string().into_bytes();
    let fields = vec![
        (ABSOLUTE_FIELD, seconds(absolute)),
        (SLIDING_FIELD, seconds(sliding.and_then(|s| i64::try_from(s).ok()))),
        (DATA_FIELD, entry.value.clone()),
    ];

    (fields, expiry)
}

#[async_trait]
impl DistributedCache for RedisDistributedCache {
    async fn get(&self, key: &str) -> VestaResult<Option<Vec<u8>>> {
        let Some(fields) = self.read(key, true).await? else {
            debug!(key = %key, "Cache miss");
            return Ok(None);
        };

        self.slide(key, &fields).await?;
        debug!(key = %key, "Cache hit");
        Ok(fields.data)
    }

    async fn set(&self, key: &str, value: &[u8], options: &CacheEntryOptions) -> VestaResult<()> {
        let now = Utc::now();
        let entry = CacheEntry::new(value.to_vec(), options, now)?;
        let (fields, expiry) = to_fields(&entry, now);

        self.cache
            .hash_replace(key, &fields, expiry, Self::db())
            .await?;

        debug!(key = %key, ?expiry, "Cache set");
        Ok(())
    }

    async fn remove(&self, key: &str) -> VestaResult<()> {
        self.cache.remove(key, Self::db()).await?;
        debug!(key = %key, "Cache remove");
        Ok(())
    }

    async fn refresh(&self, key: &str) -> VestaResult<()> {
        if let Some(fields) = self.read(key, false).await? {
            self.slide(key, &fields).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(fields: &'a [(&'static str, Vec<u8>)], name: &str) -> &'a [u8] {
        fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_slice())
            .unwrap()
    }

    #[test]
    fn test_fields_without_expiration() {
        let now = Utc::now();
        let entry = CacheEntry::new(b"payload".to_vec(), &CacheEntryOptions::new(), now).unwrap();

        let (fields, expiry) = to_fields(&entry, now);

        assert_eq!(field(&fields, DATA_FIELD), b"payload");
        assert_eq!(field(&fields, SLIDING_FIELD), b"-1");
        assert_eq!(field(&fields, ABSOLUTE_FIELD), b"-1");
        assert_eq!(expiry, Expiry::Never);
    }

    #[test]
    fn test_fields_with_both_expirations() {
        let now = Utc::now();
        let options = CacheEntryOptions::new()
            .set_sliding_expiration(Duration::from_secs(30))
            .set_absolute_expiration_in(Duration::from_secs(10));
        let entry = CacheEntry::new(b"v".to_vec(), &options, now).unwrap();

        let (fields, expiry) = to_fields(&entry, now);

        assert_eq!(field(&fields, SLIDING_FIELD), b"30");
        assert_eq!(
            field(&fields, ABSOLUTE_FIELD),
            (now + chrono::Duration::seconds(10)).timestamp().to_string().as_bytes()
        );
        assert_eq!(expiry, Expiry::In(Duration::from_secs(10)));
    }

    #[test]
    fn test_sliding_rounds_up_to_whole_seconds() {
        assert_eq!(whole_seconds(Duration::from_millis(1500)), 2);
        assert_eq!(whole_seconds(Duration::from_secs(3)), 3);
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds(Some(b"-1".to_vec())), Some(-1));
        assert_eq!(parse_seconds(Some(b"42".to_vec())), Some(42));
        assert_eq!(parse_seconds(Some(b"x".to_vec())), None);
        assert_eq!(parse_seconds(None), None);
    }
}
