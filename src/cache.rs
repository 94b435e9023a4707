use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;
use thiserror::Error;

/// Application-level ceiling on a single store round trip. A slow store
/// degrades to a cache miss instead of stalling the request.
const CACHE_OP_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
    #[error("cache operation timed out")]
    Timeout,
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

/// Key-value store with per-key expiry. `get` returning `Ok(None)` is the
/// sentinel for an absent key, distinct from a backend failure.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError>;
}

pub struct RedisCacheStore {
    manager: ConnectionManager,
}

impl RedisCacheStore {
    /// Open a connection and verify it with a PING. Callers treat any error
    /// here as fatal at startup.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let client = redis::Client::open(url)?;
        let mut manager = ConnectionManager::new(client).await?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut manager)
            .await?;

        Ok(Self { manager })
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.manager.clone();
        let value = tokio::time::timeout(CACHE_OP_TIMEOUT, conn.get::<_, Option<String>>(key))
            .await
            .map_err(|_| CacheError::Timeout)??;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        tokio::time::timeout(
            CACHE_OP_TIMEOUT,
            conn.set_ex::<_, _, ()>(key, value, ttl_secs),
        )
        .await
        .map_err(|_| CacheError::Timeout)??;
        Ok(())
    }
}
