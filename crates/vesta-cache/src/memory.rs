//! In-process distributed cache.
//!
//! An expired entry is dropped by the next access that finds it. Writes also
//! purge every expired entry, at most once per scan interval, so keys that are
//! never read again do not accumulate.

use crate::{CacheEntry, CacheEntryOptions, DistributedCache};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use vesta_core::VestaResult;

#[derive(Debug, Clone)]
struct StoredEntry {
    entry: CacheEntry,
    expires_at: Option<DateTime<Utc>>,
}

impl StoredEntry {
    fn new(entry: CacheEntry, now: DateTime<Utc>) -> Self {
        let mut stored = Self {
            entry,
            expires_at: None,
        };
        stored.touch(now);
        stored
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.expires_at = self
            .entry
            .time_to_live(now)
            .and_then(|ttl| chrono::Duration::from_std(ttl).ok())
            .and_then(|ttl| now.checked_add_signed(ttl));
    }
}

#[derive(Debug)]
struct Entries {
    map: HashMap<String, StoredEntry>,
    last_scan: DateTime<Utc>,
}

/// In-memory [`DistributedCache`].
///
/// Clones share the same storage.
#[derive(Debug, Clone)]
pub struct MemoryDistributedCache {
    entries: Arc<RwLock<Entries>>,
    scan_interval: chrono::Duration,
}

impl MemoryDistributedCache {
    /// Default minimum time between two purges of expired entries.
    pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(60);

    #[must_use]
    pub fn new() -> Self {
        Self::with_scan_interval(Self::DEFAULT_SCAN_INTERVAL)
    }

    /// Purges expired entries on a write at most once per `interval`.
    #[must_use]
    pub fn with_scan_interval(interval: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Entries {
                map: HashMap::new(),
                last_scan: Utc::now(),
            })),
            scan_interval: chrono::Duration::from_std(interval).unwrap_or(chrono::Duration::MAX),
        }
    }

    /// Number of stored entries, including expired ones not yet evicted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().map.is_empty()
    }

    /// Reads `key`, applying the sliding window when `touch` is set.
    fn access(&self, key: &str, touch: bool) -> Option<Vec<u8>> {
        let now = Utc::now();
        let mut entries = self.entries.write();

        let stored = entries.map.get_mut(key)?;
        if stored.is_expired(now) {
            entries.map.remove(key);
            debug!(key = %key, "Evicted expired entry");
            return None;
        }

        if touch && stored.entry.sliding_expiration.is_some() {
            stored.touch(now);
        }
        Some(stored.entry.value.clone())
    }

    /// Drops every expired entry when the scan interval has elapsed.
    fn purge_expired(&self, entries: &mut Entries, now: DateTime<Utc>) {
        if now.signed_duration_since(entries.last_scan) < self.scan_interval {
            return;
        }
        entries.last_scan = now;

        let before = entries.map.len();
        entries.map.retain(|_, stored| !stored.is_expired(now));
        let purged = before - entries.map.len();
        if purged > 0 {
            debug!(purged, "Purged expired entries");
        }
    }
}

impl Default for MemoryDistributedCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DistributedCache for MemoryDistributedCache {
    async fn get(&self, key: &str) -> VestaResult<Option<Vec<u8>>> {
        let value = self.access(key, true);
        match value {
            Some(_) => debug!(key = %key, "Cache hit"),
            None => debug!(key = %key, "Cache miss"),
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], options: &CacheEntryOptions) -> VestaResult<()> {
        let now = Utc::now();
        let entry = CacheEntry::new(value.to_vec(), options, now)?;
        let mut entries = self.entries.write();
        self.purge_expired(&mut entries, now);
        entries
            .map
            .insert(key.to_string(), StoredEntry::new(entry, now));
        drop(entries);
        debug!(key = %key, "Cache set");
        Ok(())
    }

    async fn remove(&self, key: &str) -> VestaResult<()> {
        self.entries.write().map.remove(key);
        Ok(())
    }

    async fn refresh(&self, key: &str) -> VestaResult<()> {
        let _ = self.access(key, true);
        Ok(())
    }
}
