//! # Vesta Redis
//!
//! Typed helpers over Redis data structures.
//!
//! [`RedisCache`] owns a connection pool. Every operation names the logical
//! database it works on, borrows a pooled connection, selects that database
//! and returns the connection to the pool when it finishes.

mod cache;
mod counters;
mod expiry;
mod hashes;
mod items;
mod lists;
mod pool;
mod pubsub;
mod queues;
mod server;
mod sets;
mod sorted_sets;

pub use cache::RedisCache;
pub use expiry::Expiry;
pub use lists::ItemRef;
pub use pool::create_pool;
pub use pubsub::{PubSubMessage, Subscription};

pub use vesta_core::DatabaseId;
