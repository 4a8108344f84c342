//! Application configuration structures.

use serde::{Deserialize, Serialize};
use vesta_core::telemetry::TelemetryConfig;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Redis connection settings.
    ///
    /// Left as `None` when the section is absent so that service
    /// registration can reject it instead of silently using defaults.
    #[serde(default)]
    pub redis: Option<RedisCacheOptions>,

    /// Data-protection key storage settings.
    #[serde(default)]
    pub data_protection: DataProtectionOptions,

    /// Tracing configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "vesta".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Redis connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisCacheOptions {
    /// Redis connection URL, e.g. `redis://:password@localhost:6379`.
    #[serde(default)]
    pub connection_string: Option<String>,

    /// Maximum pool size. `0` keeps the pool's own default.
    #[serde(default)]
    pub max_pool_size: u32,
}

impl RedisCacheOptions {
    /// Creates options for the given connection string.
    #[must_use]
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: Some(connection_string.into()),
            max_pool_size: 0,
        }
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn with_max_pool_size(mut self, max_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    /// Returns the trimmed connection string, or `None` when missing or blank.
    #[must_use]
    pub fn connection_string(&self) -> Option<&str> {
        self.connection_string
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Returns the configured pool size, or `None` for the pool default.
    #[must_use]
    pub fn pool_size(&self) -> Option<usize> {
        (self.max_pool_size > 0).then_some(self.max_pool_size as usize)
    }
}

/// Data-protection key storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataProtectionOptions {
    /// Application name that isolates this application's keys.
    pub application_name: String,
}

impl Default for DataProtectionOptions {
    fn default() -> Self {
        Self {
            application_name: "vesta".to_string(),
        }
    }
}
