//! Service registration.
//!
//! Builds every Redis-backed service from one validated configuration.
//! Construction opens no connection; call [`CacheServices::ping`] to check
//! that the server answers.

use std::sync::Arc;
use tracing::info;
use vesta_auth::RedisTicketStore;
use vesta_cache::RedisDistributedCache;
use vesta_config::{format_validation_errors, AppConfig, ConfigLoader, ConfigValidator};
use vesta_core::{VestaError, VestaResult};
use vesta_dataprotection::KeyManagementOptions;
use vesta_redis::RedisCache;

/// The Redis-backed services of an application, sharing one pool.
#[derive(Debug, Clone)]
pub struct CacheServices {
    /// Key-value facade.
    pub cache: RedisCache,
    /// Distributed byte cache in the default database.
    pub distributed_cache: RedisDistributedCache,
    /// Authentication ticket store on the distributed cache.
    pub ticket_store: Arc<RedisTicketStore>,
    /// Key management with keys persisted in the admin database.
    pub key_management: KeyManagementOptions,
}

impl CacheServices {
    /// Validates `config` and builds the services.
    ///
    /// Fails with [`VestaError::Configuration`] listing every problem when the
    /// `redis` section is missing, the connection string is blank or not a
    /// Redis URL, or the pool size is above the maximum.
    pub fn from_config(config: &AppConfig) -> VestaResult<Self> {
        ConfigValidator::validate(config)
            .map_err(|errors| VestaError::Configuration(format_validation_errors(&errors)))?;

        let options = config.redis.as_ref().ok_or_else(|| {
            VestaError::configuration("Configuration section 'redis' is required")
        })?;

        let cache = RedisCache::new(options)?;
        let distributed_cache = RedisDistributedCache::new(cache.clone());
        let ticket_store = Arc::new(RedisTicketStore::new(distributed_cache.clone()));
        let key_management = KeyManagementOptions::from_options(&config.data_protection)
            .persist_keys_to_distributed_store(cache.clone());

        info!(
            application = %key_management.application_name,
            max_pool_size = options.max_pool_size,
            "Cache services registered"
        );

        Ok(Self {
            cache,
            distributed_cache,
            ticket_store,
            key_management,
        })
    }

    /// Builds the services from the loader's current configuration.
    pub async fn from_loader(loader: &ConfigLoader) -> VestaResult<Self> {
        let config = loader.get().await;
        Self::from_config(&config)
    }

    /// Checks that the Redis server answers.
    pub async fn ping(&self) -> VestaResult<()> {
        self.cache.ping().await?;
        Ok(())
    }
}
