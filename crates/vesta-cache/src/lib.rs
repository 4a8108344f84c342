//! # Vesta Cache
//!
//! A byte-oriented distributed cache with sliding and absolute expiration.
//!
//! [`RedisDistributedCache`] stores entries in Redis; [`MemoryDistributedCache`]
//! keeps them in process with the same expiration rules.

mod distributed;
mod entry;
mod memory;
mod options;
mod redis_cache;

pub use distributed::{DistributedCache, DistributedCacheExt};
pub use entry::CacheEntry;
pub use memory::MemoryDistributedCache;
pub use options::CacheEntryOptions;
pub use redis_cache::RedisDistributedCache;
