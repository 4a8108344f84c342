//! Configuration validation module.
//!
//! Validation runs at setup time and collects every problem it finds,
//! so a misconfigured service fails before any store is constructed.

use crate::{AppConfig, DataProtectionOptions, RedisCacheOptions};
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A required configuration section is absent.
    MissingSection { name: String },
    /// The Redis connection string is missing or blank.
    MissingConnectionString,
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Pool size exceeds maximum allowed.
    PoolSizeTooLarge { value: u32, maximum: u32 },
    /// Data-protection application name is blank.
    EmptyApplicationName,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSection { name } => {
                write!(f, "Configuration section '{}' is required", name)
            }
            Self::MissingConnectionString => {
                write!(f, "Invalid Redis configuration. Connection string is required")
            }
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::PoolSizeTooLarge { value, maximum } => {
                write!(
                    f,
                    "Pool size {} exceeds maximum allowed ({})",
                    value, maximum
                )
            }
            Self::EmptyApplicationName => {
                write!(f, "Data-protection application name cannot be empty")
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Result of configuration validation containing all errors found.
#[derive(Debug)]
pub struct ValidationResult {
    errors: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Creates a new validation result.
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error to the result.
    fn add_error(&mut self, error: ConfigValidationError) {
        self.errors.push(error);
    }

    /// Returns true if validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the validation errors.
    pub fn errors(&self) -> &[ConfigValidationError] {
        &self.errors
    }

    /// Converts to Result, returning Err with all errors if any exist.
    pub fn into_result(self) -> Result<(), Vec<ConfigValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum connection pool size.
    pub const MAX_POOL_SIZE: u32 = 1000;
    /// URL schemes accepted by the Redis client.
    const REDIS_SCHEMES: &'static [&'static str] = &["redis", "rediss", "redis+unix", "unix"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut result = ValidationResult::new();

        match &config.redis {
            Some(redis) => Self::check_redis(redis, &mut result),
            None => result.add_error(ConfigValidationError::MissingSection {
                name: "redis".to_string(),
            }),
        }
        Self::check_data_protection(&config.data_protection, &mut result);

        result.into_result()
    }

    /// Validates a Redis section on its own.
    pub fn validate_redis(options: &RedisCacheOptions) -> Result<(), Vec<ConfigValidationError>> {
        let mut result = ValidationResult::new();
        Self::check_redis(options, &mut result);
        result.into_result()
    }

    fn check_redis(config: &RedisCacheOptions, result: &mut ValidationResult) {
        match config.connection_string() {
            None => result.add_error(ConfigValidationError::MissingConnectionString),
            Some(connection_string) => match Url::parse(connection_string) {
                Ok(url) if Self::REDIS_SCHEMES.contains(&url.scheme()) => {}
                Ok(url) => result.add_error(ConfigValidationError::InvalidUrl {
                    url_type: "redis".to_string(),
                    message: format!("unsupported scheme '{}'", url.scheme()),
                }),
                Err(e) => result.add_error(ConfigValidationError::InvalidUrl {
                    url_type: "redis".to_string(),
                    message: e.to_string(),
                }),
            },
        }

        if config.max_pool_size > Self::MAX_POOL_SIZE {
            result.add_error(ConfigValidationError::PoolSizeTooLarge {
                value: config.max_pool_size,
                maximum: Self::MAX_POOL_SIZE,
            });
        }
    }

    fn check_data_protection(config: &DataProtectionOptions, result: &mut ValidationResult) {
        if config.application_name.trim().is_empty() {
            result.add_error(ConfigValidationError::EmptyApplicationName);
        }
    }
}

/// Formats validation errors for display.
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
