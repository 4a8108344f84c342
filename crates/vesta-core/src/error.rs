//! Unified error type for all Vesta crates.

use thiserror::Error;

/// Unified error type for Vesta.
///
/// Store errors are wrapped with their source intact; nothing in Vesta
/// retries or translates them. Missing keys are never reported as errors.
#[derive(Error, Debug)]
pub enum VestaError {
    // ============ Store Errors ============
    /// Error reported by the Redis client (connectivity or protocol).
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// A connection could not be acquired from the pool.
    #[error("Redis pool error: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    /// The connection pool could not be built.
    #[error("Redis pool build error: {0}")]
    PoolBuild(String),

    // ============ Data Errors ============
    /// JSON (de)serialization of a stored value failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored key descriptor is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// Argument rejected before reaching the store.
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Setup Errors ============
    /// Configuration error, raised while wiring services.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VestaError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Redis(_) => "REDIS_ERROR",
            Self::Pool(_) | Self::PoolBuild(_) => "POOL_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Xml(_) => "XML_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error means the store could not be reached.
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        match self {
            Self::Redis(err) => {
                err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped()
            }
            Self::Pool(_) => true,
            _ => false,
        }
    }
}
