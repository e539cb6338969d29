//! Refresh token registry
//!
//! A refresh token is honoured only while its `jti` is registered here.
//! Logout revokes one token, password change and account deletion revoke
//! all of a user's tokens.

use async_trait::async_trait;
use dashmap::DashMap;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use yatube_core::Snowflake;

use crate::pool::{CacheResult, RedisPool};

/// Key prefix for refresh tokens
const REFRESH_TOKEN_PREFIX: &str = "refresh_token:";
/// Key prefix for the per-user set of token IDs
const USER_TOKENS_PREFIX: &str = "user_tokens:";

/// Stored alongside a refresh token ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenData {
    pub user_id: Snowflake,
    /// Unix epoch seconds
    pub created_at: i64,
}

impl RefreshTokenData {
    pub fn new(user_id: Snowflake) -> Self {
        Self {
            user_id,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Register a token ID for `ttl`
    async fn store(&self, token_id: &str, data: &RefreshTokenData, ttl: Duration) -> CacheResult<()>;

    /// Data for a registered, unexpired token
    async fn get(&self, token_id: &str) -> CacheResult<Option<RefreshTokenData>>;

    /// Unregister one token; returns whether it was registered
    async fn revoke(&self, token_id: &str) -> CacheResult<bool>;

    /// Unregister every token of a user; returns how many were removed
    async fn revoke_all_for_user(&self, user_id: Snowflake) -> CacheResult<u64>;
}

// ============================================================================
// Redis
// ============================================================================

#[derive(Clone, Debug)]
pub struct RedisRefreshTokenStore {
    pool: RedisPool,
}

impl RedisRefreshTokenStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(token_id: &str) -> String {
        format!("{REFRESH_TOKEN_PREFIX}{token_id}")
    }

    fn user_key(user_id: Snowflake) -> String {
        format!("{USER_TOKENS_PREFIX}{user_id}")
    }
}

#[async_trait]
impl RefreshTokenStore for RedisRefreshTokenStore {
    async fn store(&self, token_id: &str, data: &RefreshTokenData, ttl: Duration) -> CacheResult<()> {
        let ttl_secs = ttl.as_secs().max(1);
        self.pool.set_json(&Self::key(token_id), data, ttl_secs).await?;

        let user_key = Self::user_key(data.user_id);
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(&user_key, token_id).await?;
        conn.expire::<_, ()>(&user_key, ttl_secs as i64).await?;

        tracing::debug!(token_id = %token_id, user_id = %data.user_id, "Stored refresh token");
        Ok(())
    }

    async fn get(&self, token_id: &str) -> CacheResult<Option<RefreshTokenData>> {
        self.pool.get_json(&Self::key(token_id)).await
    }

    async fn revoke(&self, token_id: &str) -> CacheResult<bool> {
        if let Some(data) = self.get(token_id).await? {
            let mut conn = self.pool.get().await?;
            conn.srem::<_, _, ()>(Self::user_key(data.user_id), token_id)
                .await?;
        }
        self.pool.delete(&Self::key(token_id)).await
    }

    async fn revoke_all_for_user(&self, user_id: Snowflake) -> CacheResult<u64> {
        let user_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;

        let token_ids: Vec<String> = conn.smembers(&user_key).await?;
        let keys: Vec<String> = token_ids.iter().map(|id| Self::key(id)).collect();
        let removed = self.pool.delete_many(&keys).await?;
        conn.del::<_, ()>(&user_key).await?;

        tracing::info!(user_id = %user_id, removed, "Revoked all refresh tokens for user");
        Ok(removed)
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Process-local token registry
#[derive(Default)]
pub struct MemoryRefreshTokenStore {
    tokens: DashMap<String, (RefreshTokenData, Instant)>,
}

impl MemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn store(&self, token_id: &str, data: &RefreshTokenData, ttl: Duration) -> CacheResult<()> {
        self.tokens
            .insert(token_id.to_string(), (data.clone(), Instant::now() + ttl));
        Ok(())
    }

    async fn get(&self, token_id: &str) -> CacheResult<Option<RefreshTokenData>> {
        let now = Instant::now();
        Ok(self
            .tokens
            .get(token_id)
            .filter(|entry| entry.1 > now)
            .map(|entry| entry.0.clone()))
    }

    async fn revoke(&self, token_id: &str) -> CacheResult<bool> {
        Ok(self.tokens.remove(token_id).is_some())
    }

    async fn revoke_all_for_user(&self, user_id: Snowflake) -> CacheResult<u64> {
        let before = self.tokens.len();
        self.tokens.retain(|_, (data, _)| data.user_id != user_id);
        Ok((before - self.tokens.len()) as u64)
    }
}
