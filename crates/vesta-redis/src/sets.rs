use crate::cache::RedisCache;
use redis::AsyncCommands;
use vesta_core::{DatabaseId, VestaResult};

impl RedisCache {
    /// Adds `member`, returning whether it was new.
    pub async fn set_add(&self, key: &str, member: &str, db: DatabaseId) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;
        let added: u64 = conn.sadd(key, member).await?;
        Ok(added > 0)
    }

    /// Adds every member, returning how many were new.
    pub async fn set_add_range(&self, key: &str, members: &[String], db: DatabaseId) -> VestaResult<u64> {
        if members.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection(db).await?;
        Ok(conn.sadd(key, members).await?)
    }

    pub async fn set_contains(&self, key: &str, member: &str, db: DatabaseId) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;
        Ok(conn.sismember(key, member).await?)
    }

    pub async fn set_remove(&self, key: &str, member: &str, db: DatabaseId) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;
        let removed: u64 = conn.srem(key, member).await?;
        Ok(removed > 0)
    }

    pub async fn set_members(&self, key: &str, db: DatabaseId) -> VestaResult<Vec<String>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.smembers(key).await?)
    }

    pub async fn set_count(&self, key: &str, db: DatabaseId) -> VestaResult<u64> {
        let mut conn = self.connection(db).await?;
        Ok(conn.scard(key).await?)
    }

    /// Removes and returns a random member.
    pub async fn set_pop(&self, key: &str, db: DatabaseId) -> VestaResult<Option<String>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.spop(key).await?)
    }

    pub async fn set_random_member(&self, key: &str, db: DatabaseId) -> VestaResult<Option<String>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.srandmember(key).await?)
    }

    /// Moves `member` from one set to another.
    pub async fn set_move(&self, from: &str, to: &str, member: &str, db: DatabaseId) -> VestaResult<bool> {
        let mut conn = self.connection(db).await?;
        Ok(conn.smove(from, to, member).await?)
    }

    pub async fn set_union(&self, keys: &[&str], db: DatabaseId) -> VestaResult<Vec<String>> {
        let mut conn = self.connection(db).await?;
        Ok(conn.sunion(keys).await?)
    }

    /// Stores the union of `keys` into `destination`, returning its size.
    pub async fn set_store_union(&self, destination: &str, keys: &[&str], db: DatabaseId) -> VestaResult<u64> {
        let mut conn = self.connection(db).await?;
        Ok(conn.sunionstore(destination, keys).await?)
    }

    /// Stores the members of the first key missing from the others.
    pub async fn set_store_difference(
        &self,
        destination: &str,
        keys: &[&str],
        db: DatabaseId,
    ) -> VestaResult<u64> {
        let mut conn = self.connection(db).await?;
        Ok(conn.sdiffstore(destination, keys).await?)
    }
}
