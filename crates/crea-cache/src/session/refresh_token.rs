//! Refresh token storage in Redis.
//!
//! A refresh JWT is only honoured while its `jti` is present here. Each user
//! also has a set of live token ids so every session can be revoked at once.

use crate::pool::{RedisPool, RedisResult};
use crea_core::Snowflake;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

/// Key prefix for refresh tokens
const REFRESH_TOKEN_PREFIX: &str = "refresh_token:";

/// Key prefix for a user's set of token ids
const USER_TOKENS_PREFIX: &str = "user_tokens:";

/// Default TTL for refresh tokens (7 days)
const DEFAULT_REFRESH_TOKEN_TTL: u64 = 7 * 24 * 60 * 60;

/// Stored refresh token data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenData {
    /// User ID this token belongs to
    pub user_id: Snowflake,
    /// Token creation timestamp (Unix epoch seconds)
    pub created_at: i64,
}

impl RefreshTokenData {
    #[must_use]
    pub fn new(user_id: Snowflake) -> Self {
        Self {
            user_id,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Refresh token store for managing authentication sessions
#[derive(Clone)]
pub struct RefreshTokenStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl RefreshTokenStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            ttl_seconds: DEFAULT_REFRESH_TOKEN_TTL,
        }
    }

    /// Create with custom TTL, normally the refresh JWT lifetime
    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    fn key(token_id: &str) -> String {
        format!("{REFRESH_TOKEN_PREFIX}{token_id}")
    }

    fn user_key(user_id: Snowflake) -> String {
        format!("{USER_TOKENS_PREFIX}{user_id}")
    }

    /// Store a refresh token
    pub async fn store(&self, token_id: &str, data: &RefreshTokenData) -> RedisResult<()> {
        let key = Self::key(token_id);
        self.pool.put_json(&key, data, self.ttl_seconds).await?;

        let user_set_key = Self::user_key(data.user_id);
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(&user_set_key, token_id).await?;
        conn.expire::<_, ()>(&user_set_key, self.ttl_seconds as i64)
            .await?;

        tracing::debug!(token_id = %token_id, user_id = %data.user_id, "Stored refresh token");

        Ok(())
    }

    /// Token data, or `None` once expired or revoked
    pub async fn get(&self, token_id: &str) -> RedisResult<Option<RefreshTokenData>> {
        self.pool.get_json(&Self::key(token_id)).await
    }

    /// Revoke a refresh token. Returns `false` if it was already gone, which
    /// is how a replayed token is detected during rotation.
    pub async fn revoke(&self, token_id: &str) -> RedisResult<bool> {
        if let Some(data) = self.get(token_id).await? {
            let mut conn = self.pool.get().await?;
            conn.srem::<_, _, ()>(Self::user_key(data.user_id), token_id)
                .await?;
        }

        let deleted = self.pool.remove(&Self::key(token_id)).await?;
        if deleted {
            tracing::debug!(token_id = %token_id, "Revoked refresh token");
        }

        Ok(deleted)
    }

    /// Revoke all tokens for a user (logout everywhere)
    pub async fn revoke_all_for_user(&self, user_id: Snowflake) -> RedisResult<u32> {
        let user_set_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;

        let token_ids: Vec<String> = conn.smembers(&user_set_key).await?;
        let count = token_ids.len() as u32;

        let keys: Vec<String> = token_ids.iter().map(|id| Self::key(id)).collect();
        self.pool.remove_all(&keys).await?;
        conn.del::<_, ()>(&user_set_key).await?;

        tracing::info!(user_id = %user_id, count, "Revoked all refresh tokens for user");

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_data_creation() {
        let user_id = Snowflake::from(12345i64);
        let data = RefreshTokenData::new(user_id);
        assert_eq!(data.user_id, user_id);
        assert!(data.created_at > 0);
    }

    #[test]
    fn test_key_generation() {
        assert_eq!(RefreshTokenStore::key("abc123"), "refresh_token:abc123");
        assert_eq!(RefreshTokenStore::user_key(Snowflake::new(7)), "user_tokens:7");
    }

    #[test]
    fn test_data_serializes_id_as_string() {
        let data = RefreshTokenData {
            user_id: Snowflake::new(42),
            created_at: 1,
        };
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"user_id":"42","created_at":1}"#);
    }
}
