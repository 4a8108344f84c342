//! # Vesta
//!
//! Redis-backed building blocks for web applications:
//!
//! - [`RedisCache`]: typed helpers over strings, lists, sets, hashes,
//!   sorted sets, queues and pub/sub, per logical database
//! - [`RedisDistributedCache`]: byte cache with sliding and absolute expiration
//! - [`RedisTicketStore`]: authentication tickets with optional single-session accounts
//! - [`RedisXmlRepository`]: shared data-protection key descriptors
//!
//! [`CacheServices::from_config`] validates the configuration and wires all of
//! them over one connection pool.

pub mod services;

pub use services::CacheServices;

pub use vesta_auth::{
    AuthenticationProperties, AuthenticationTicket, ClaimsIdentity, ClaimsPrincipal,
    RedisTicketStore, TicketStore,
};
pub use vesta_cache::{
    CacheEntryOptions, DistributedCache, DistributedCacheExt, MemoryDistributedCache,
    RedisDistributedCache,
};
pub use vesta_config::{AppConfig, ConfigLoader, DataProtectionOptions, RedisCacheOptions};
pub use vesta_core::{DatabaseId, VestaError, VestaResult};
pub use vesta_dataprotection::{KeyManagementOptions, RedisXmlRepository, XmlElement, XmlRepository};
pub use vesta_redis::{Expiry, RedisCache};

pub use vesta_auth as auth;
pub use vesta_cache as cache;
pub use vesta_config as config;
pub use vesta_dataprotection as dataprotection;
pub use vesta_redis as redis;
