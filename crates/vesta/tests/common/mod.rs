//! Common test infrastructure for end-to-end tests.

use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::redis::{Redis, REDIS_PORT};
use vesta::{AppConfig, CacheServices, RedisCacheOptions};

/// Test Redis container wrapper.
///
/// Starts Redis and builds the full service set against it.
pub struct TestRedis {
    _container: ContainerAsync<Redis>,
    services: CacheServices,
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

        let config = AppConfig {
            redis: Some(
                RedisCacheOptions::new(format!("redis://127.0.0.1:{}", port)).with_max_pool_size(8),
            ),
            ..AppConfig::default()
        };
        let services = CacheServices::from_config(&config).expect("Invalid test configuration");

        Self::wait_until_ready(&services, 30).await;

        Self {
            _container: container,
            services,
        }
    }

    /// Returns the service set.
    pub fn services(&self) -> &CacheServices {
        &self.services
    }

    async fn wait_until_ready(services: &CacheServices, max_attempts: u32) {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match services.ping().await {
                Ok(()) => return,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!("Redis not ready after {} attempts: {}", max_attempts, e);
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
                }
            }
        }
    }
}
