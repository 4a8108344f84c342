use chrono::{DateTime, Utc};
use std::time::Duration;

/// Expiration applied when writing a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expiry {
    /// The key never expires.
    #[default]
    Never,
    /// The key expires after the given duration.
    In(Duration),
    /// The key expires at the given instant.
    At(DateTime<Utc>),
}

impl Expiry {
    /// Appends `PX`/`PXAT` arguments to a `SET` command.
    pub(crate) fn apply_to_set(self, cmd: &mut redis::Cmd) {
        match self {
            Self::Never => {}
            Self::In(ttl) => {
                cmd.arg("PX").arg(millis(ttl));
            }
            Self::At(at) => {
                cmd.arg("PXAT").arg(at.timestamp_millis());
            }
        }
    }

    /// Queues a `PEXPIRE`/`PEXPIREAT` for `key` on a pipeline.
    pub(crate) fn apply_to_key(self, pipe: &mut redis::Pipeline, key: &str) {
        match self {
            Self::Never => {}
            Self::In(ttl) => {
                pipe.cmd("PEXPIRE").arg(key).arg(millis(ttl)).ignore();
            }
            Self::At(at) => {
                pipe.cmd("PEXPIREAT")
                    .arg(key)
                    .arg(at.timestamp_millis())
                    .ignore();
            }
        }
    }
}

impl From<Duration> for Expiry {
    fn from(ttl: Duration) -> Self {
        Self::In(ttl)
    }
}

impl From<DateTime<Utc>> for Expiry {
    fn from(at: DateTime<Utc>) -> Self {
        Self::At(at)
    }
}

/// Milliseconds for `PX`, never zero since Redis rejects a zero expiry.
pub(crate) fn millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}
