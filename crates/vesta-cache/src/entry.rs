use crate::CacheEntryOptions;
use chrono::{DateTime, Utc};
use std::time::Duration;
use vesta_core::VestaResult;

/// A cached value together with its expiration settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub value: Vec<u8>,
    pub sliding_expiration: Option<Duration>,
    pub absolute_expiration: Option<DateTime<Utc>>,
}

impl CacheEntry {
    /// Builds an entry for a write at `now`.
    pub fn new(value: Vec<u8>, options: &CacheEntryOptions, now: DateTime<Utc>) -> VestaResult<Self> {
        Ok(Self {
            value,
            sliding_expiration: options.checked_sliding()?,
            absolute_expiration: options.absolute_expiration_at(now)?,
        })
    }

    /// Time the entry may live from `now`: the sliding window capped by
    /// the absolute expiration. `None` means no expiry.
    #[must_use]
    pub fn time_to_live(&self, now: DateTime<Utc>) -> Option<Duration> {
        let remaining = self
            .absolute_expiration
            .map(|at| (at - now).to_std().unwrap_or(Duration::ZERO));

        match (self.sliding_expiration, remaining) {
            (Some(idle), Some(left)) => Some(idle.min(left)),
            (Some(idle), None) => Some(idle),
            (None, left) => left,
        }
    }

    /// Whether the absolute expiration has passed.
    #[must_use]
    pub fn is_past_absolute(&self, now: DateTime<Utc>) -> bool {
        self.absolute_expiration.is_some_and(|at| at <= now)
    }
}
