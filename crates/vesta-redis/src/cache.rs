use crate::pool::create_pool;
use deadpool_redis::{Connection, Pool};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use tracing::info;
use vesta_config::RedisCacheOptions;
use vesta_core::{DatabaseId, VestaError, VestaResult};

/// Typed Redis facade.
///
/// Cloning is cheap: clones share the same pool and client.
#[derive(Clone)]
pub struct RedisCache {
    pool: Pool,
    client: redis::Client,
}

impl RedisCache {
    /// Creates a facade from configuration.
    pub fn new(options: &RedisCacheOptions) -> VestaResult<Self> {
        let pool = create_pool(options)?;
        let url = options.connection_string().ok_or_else(|| {
            VestaError::configuration("Invalid Redis configuration. Connection string is required")
        })?;
        let client = redis::Client::open(url)?;

        Ok(Self { pool, client })
    }

    /// Creates a facade from an existing pool and client.
    pub fn from_parts(pool: Pool, client: redis::Client) -> Self {
        Self { pool, client }
    }

    /// Creates a facade and checks that the server answers.
    pub async fn connect(options: &RedisCacheOptions) -> VestaResult<Self> {
        let cache = Self::new(options)?;
        cache.ping().await?;
        info!("Connected to Redis");
        Ok(cache)
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub(crate) fn client(&self) -> &redis::Client {
        &self.client
    }

    /// Borrows a pooled connection without selecting a database.
    pub(crate) async fn raw_connection(&self) -> VestaResult<Connection> {
        Ok(self.pool.get().await?)
    }

    /// Borrows a pooled connection switched to `db`.
    ///
    /// Pooled connections keep whatever database the previous borrower
    /// selected, so `SELECT` is sent on every borrow.
    pub(crate) async fn connection(&self, db: DatabaseId) -> VestaResult<Connection> {
        let mut conn = self.raw_connection().await?;
        redis::cmd("SELECT")
            .arg(db.index())
            .query_async::<()>(&mut *conn)
            .await?;
        Ok(conn)
    }
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("pool", &self.pool.status())
            .finish_non_exhaustive()
    }
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> VestaResult<String> {
    Ok(serde_json::to_string(value)?)
}

pub(crate) fn from_json<T: DeserializeOwned>(value: &str) -> VestaResult<T> {
    Ok(serde_json::from_str(value)?)
}

pub(crate) fn from_json_opt<T: DeserializeOwned>(value: Option<String>) -> VestaResult<Option<T>> {
    value.as_deref().map(from_json).transpose()
}

/// Converts a 1-based page into an inclusive index range.
pub(crate) fn page_bounds(page_index: usize, page_size: usize) -> Option<(isize, isize)> {
    if page_size == 0 {
        return None;
    }
    let start = page_index.saturating_sub(1).saturating_mul(page_size);
    let stop = start.saturating_add(page_size - 1);
    Some((
        isize::try_from(start).ok()?,
        isize::try_from(stop).unwrap_or(isize::MAX),
    ))
}
