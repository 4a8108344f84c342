use crate::cache::RedisCache;
use tracing::info;
use vesta_core::VestaResult;

impl RedisCache {
    /// Checks that the server answers.
    pub async fn ping(&self) -> VestaResult<String> {
        let mut conn = self.raw_connection().await?;
        Ok(redis::cmd("PING").query_async::<String>(&mut *conn).await?)
    }

    /// Synchronously writes the dataset to disk.
    pub async fn save(&self) -> VestaResult<()> {
        let mut conn = self.raw_connection().await?;
        redis::cmd("SAVE").query_async::<()>(&mut *conn).await?;
        info!("Redis dataset saved");
        Ok(())
    }

    /// Asks the server to write the dataset to disk in the background.
    pub async fn background_save(&self) -> VestaResult<()> {
        let mut conn = self.raw_connection().await?;
        redis::cmd("BGSAVE").query_async::<()>(&mut *conn).await?;
        info!("Redis background save started");
        Ok(())
    }
}
