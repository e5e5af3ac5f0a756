//! Redis-based cache implementation.

use super::CacheInterface;
use adbiz_config::RedisConfig;
use adbiz_core::{AdbizError, AdbizResult};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, Runtime};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Creates the Redis connection pool, or `None` when Redis is disabled.
///
/// No connection is opened here; an unreachable server shows up later as
/// `Cache` errors, which callers treat as misses.
pub fn create_redis_pool(config: &RedisConfig) -> AdbizResult<Option<Arc<Pool>>> {
    if !config.enabled {
        info!("Redis disabled");
        return Ok(None);
    }

    let pool = Config::from_url(&config.url)
        .builder()
        .map_err(|e| AdbizError::Configuration(format!("Invalid Redis config: {}", e)))?
        .max_size(config.pool_size as usize)
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| AdbizError::Cache(format!("Failed to create Redis pool: {}", e)))?;

    info!("Redis connection pool created");
    Ok(Some(Arc::new(pool)))
}

/// Redis-based cache service.
pub struct RedisCacheService {
    pool: Arc<Pool>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    async fn get_conn(&self) -> AdbizResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| AdbizError::Cache(format!("Failed to get Redis connection: {}", e)))
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    async fn get_raw(&self, key: &str) -> AdbizResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            AdbizError::Cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> AdbizResult<()> {
        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
            AdbizError::Cache(format!("Failed to set key '{}': {}", key, e))
        })?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> AdbizResult<bool> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            AdbizError::Cache(format!("Failed to delete key '{}': {}", key, e))
        })?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }
}
