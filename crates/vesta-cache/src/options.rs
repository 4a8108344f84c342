use chrono::{DateTime, Utc};
use std::time::Duration;
use vesta_core::{VestaError, VestaResult};

/// Expiration settings for a single cache write.
///
/// With nothing set, the entry does not expire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheEntryOptions {
    /// Instant at which the entry expires.
    pub absolute_expiration: Option<DateTime<Utc>>,
    /// Lifetime measured from the write. Takes precedence over
    /// `absolute_expiration` when both are set.
    pub absolute_expiration_relative_to_now: Option<Duration>,
    /// Idle time after which the entry expires. Reset by every read.
    pub sliding_expiration: Option<Duration>,
}

impl CacheEntryOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set_absolute_expiration(mut self, at: DateTime<Utc>) -> Self {
        self.absolute_expiration = Some(at);
        self
    }

    #[must_use]
    pub fn set_absolute_expiration_in(mut self, ttl: Duration) -> Self {
        self.absolute_expiration_relative_to_now = Some(ttl);
        self
    }

    #[must_use]
    pub fn set_sliding_expiration(mut self, idle: Duration) -> Self {
        self.sliding_expiration = Some(idle);
        self
    }

    /// Resolves the absolute expiration instant for a write at `now`.
    ///
    /// Fails when the result is not in the future.
    pub fn absolute_expiration_at(&self, now: DateTime<Utc>) -> VestaResult<Option<DateTime<Utc>>> {
        let absolute = match self.absolute_expiration_relative_to_now {
            Some(ttl) => {
                let ttl = chrono::Duration::from_std(ttl).map_err(|_| {
                    VestaError::validation("The relative expiration value is out of range.")
                })?;
                Some(now + ttl)
            }
            None => self.absolute_expiration,
        };

        match absolute {
            Some(at) if at <= now => Err(VestaError::validation(
                "The absolute expiration value must be in the future.",
            )),
            other => Ok(other),
        }
    }

    /// Validates the sliding expiration.
    pub(crate) fn checked_sliding(&self) -> VestaResult<Option<Duration>> {
        match self.sliding_expiration {
            Some(idle) if idle.is_zero() => Err(VestaError::validation(
                "The sliding expiration value must be positive.",
            )),
            other => Ok(other),
        }
    }
}
