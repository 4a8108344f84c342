use deadpool_redis::{Config, Pool, Runtime};
use tracing::info;
use vesta_config::RedisCacheOptions;
use vesta_core::{VestaError, VestaResult};

/// Create a Redis connection pool.
///
/// Building the pool does not open a connection; the first borrower does.
pub fn create_pool(options: &RedisCacheOptions) -> VestaResult<Pool> {
    let url = options.connection_string().ok_or_else(|| {
        VestaError::configuration("Invalid Redis configuration. Connection string is required")
    })?;

    info!(max_pool_size = options.max_pool_size, "Creating Redis connection pool...");

    let mut builder = Config::from_url(url)
        .builder()
        .map_err(|e| VestaError::PoolBuild(format!("Invalid Redis config: {}", e)))?;

    if let Some(size) = options.pool_size() {
        builder = builder.max_size(size);
    }

    let pool = builder
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| VestaError::PoolBuild(format!("Failed to create pool: {}", e)))?;

    info!("Redis connection pool created successfully");

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pool_honours_max_size() {
        let options = RedisCacheOptions::new("redis://127.0.0.1:6379").with_max_pool_size(7);

        let pool = create_pool(&options).unwrap();

        assert_eq!(pool.status().max_size, 7);
    }

    #[test]
    fn test_missing_connection_string_is_rejected() {
        let err = create_pool(&RedisCacheOptions::default()).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
