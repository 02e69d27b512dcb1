//! Redis connection pool using deadpool-redis.
//!
//! Everything the portal keeps in Redis is a short-lived JSON record with a
//! TTL, so the pool exposes exactly that plus raw connections for the few
//! multi-key commands the stores issue themselves.

use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};

/// Redis pool configuration
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    /// Redis connection URL (e.g., `redis://localhost:6379`)
    pub url: String,
    /// Upper bound on open connections
    pub max_connections: usize,
}

impl Default for RedisPoolConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            max_connections: 16,
        }
    }
}

impl From<&crea_common::RedisConfig> for RedisPoolConfig {
    fn from(config: &crea_common::RedisConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: usize::try_from(config.max_connections).unwrap_or(usize::MAX),
        }
    }
}

/// Error type for Redis pool operations
#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Redis pool misconfigured: {0}")]
    Config(String),

    #[error("No Redis connection available: {0}")]
    Checkout(#[from] deadpool_redis::PoolError),

    #[error("Redis command failed: {0}")]
    Command(#[from] redis::RedisError),

    #[error("Cached record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RedisResult<T> = Result<T, RedisPoolError>;

/// Host part of a Redis URL, without any `user:password@` prefix
fn redacted(url: &str) -> &str {
    url.rsplit_once('@').map_or(url, |(_, host)| host)
}

/// Managed Redis connection pool
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisPool")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}

impl RedisPool {
    pub fn new(config: RedisPoolConfig) -> RedisResult<Self> {
        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(|e| RedisPoolError::Config(e.to_string()))?
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RedisPoolError::Config(e.to_string()))?;

        tracing::info!(
            url = %redacted(&config.url),
            max_connections = config.max_connections,
            "Redis pool created"
        );

        Ok(Self { pool })
    }

    pub fn from_config(config: &crea_common::RedisConfig) -> RedisResult<Self> {
        Self::new(RedisPoolConfig::from(config))
    }

    /// Check out a connection for commands the helpers below do not cover
    pub async fn get(&self) -> RedisResult<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }

    /// `PING`, used by the readiness probe
    pub async fn health_check(&self) -> RedisResult<()> {
        let mut conn = self.get().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    /// Store `value` as JSON under `key`, expiring after `ttl_seconds`
    pub async fn put_json<V: Serialize>(&self, key: &str, value: &V, ttl_seconds: u64) -> RedisResult<()> {
        let payload = serde_json::to_string(value)?;
        let mut conn = self.get().await?;
        conn.set_ex::<_, _, ()>(key, payload, ttl_seconds).await?;
        Ok(())
    }

    /// The JSON record under `key`, if it has not expired
    pub async fn get_json<V: DeserializeOwned>(&self, key: &str) -> RedisResult<Option<V>> {
        let mut conn = self.get().await?;
        let payload: Option<String> = conn.get(key).await?;
        payload
            .map(|p| serde_json::from_str(&p))
            .transpose()
            .map_err(RedisPoolError::from)
    }

    /// Remove `key`; true when this call deleted it
    pub async fn remove(&self, key: &str) -> RedisResult<bool> {
        let mut conn = self.get().await?;
        let removed: u32 = conn.del(key).await?;
        Ok(removed > 0)
    }

    /// Remove every key in `keys`, returning how many existed
    pub async fn remove_all(&self, keys: &[String]) -> RedisResult<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.get().await?;
        let removed: u64 = conn.del(keys).await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_redis_config() {
        let redis_config = crea_common::RedisConfig {
            url: "redis://localhost:6380".to_string(),
            max_connections: 32,
        };
        let pool_config = RedisPoolConfig::from(&redis_config);
        assert_eq!(pool_config.url, "redis://localhost:6380");
        assert_eq!(pool_config.max_connections, 32);
    }

    #[test]
    fn test_redacted_hides_credentials() {
        assert_eq!(redacted("redis://:s3cret@cache.internal:6379"), "cache.internal:6379");
        assert_eq!(redacted("redis://127.0.0.1:6379"), "redis://127.0.0.1:6379");
    }

    #[tokio::test]
    async fn test_pool_builds_without_connecting() {
        let pool = RedisPool::new(RedisPoolConfig::default()).unwrap();
        assert!(format!("{pool:?}").contains("RedisPool"));
    }
}
