//! Common test infrastructure for Redis integration tests.

use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::redis::{Redis, REDIS_PORT};
use vesta_config::RedisCacheOptions;
use vesta_redis::RedisCache;

/// Test Redis container wrapper.
///
/// Manages a Redis testcontainer lifecycle and provides a connected facade.
pub struct TestRedis {
    _container: ContainerAsync<Redis>,
    cache: RedisCache,
}

impl TestRedis {
    /// Starts a fresh Redis container.
    pub async fn new() -> Self {
        let container = Redis::default()
            .with_tag("7.2-alpine")
            .start()
            .await
            .expect("Failed to start Redis container");

        let port = container
            .get_host_port_ipv4(REDIS_PORT)
            .await
            .expect("Failed to get Redis port");

        let options =
            RedisCacheOptions::new(format!("redis://127.0.0.1:{}", port)).with_max_pool_size(8);

        let cache = Self::connect_with_retry(&options, 30).await;

        Self {
            _container: container,
            cache,
        }
    }

    /// Returns the connected facade.
    pub fn cache(&self) -> RedisCache {
        self.cache.clone()
    }

    async fn connect_with_retry(options: &RedisCacheOptions, max_attempts: u32) -> RedisCache {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match RedisCache::connect(options).await {
                Ok(cache) => return cache,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!("Failed to connect to Redis after {} attempts: {}", max_attempts, e);
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
                }
            }
        }
    }
}
