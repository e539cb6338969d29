//! Redis-backed page cache

use async_trait::async_trait;
use std::time::Duration;

use super::PageCache;
use crate::pool::{CacheResult, RedisPool};

/// Key prefix for cached pages
const PAGE_CACHE_PREFIX: &str = "page_cache:";

/// Page cache shared by every process using the same Redis
#[derive(Clone, Debug)]
pub struct RedisPageCache {
    pool: RedisPool,
}

impl RedisPageCache {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(page_key: &str) -> String {
        format!("{PAGE_CACHE_PREFIX}{page_key}")
    }
}

#[async_trait]
impl PageCache for RedisPageCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        self.pool.get_bytes(&Self::key(key)).await
    }

    async fn set(&self, key: &str, body: &[u8], ttl: Duration) -> CacheResult<()> {
        // SETEX rejects a zero expiry
        let ttl = ttl.as_secs().max(1);
        self.pool.set_bytes(&Self::key(key), body, ttl).await
    }

    async fn clear(&self) -> CacheResult<u64> {
        let keys = self.pool.scan_keys(&format!("{PAGE_CACHE_PREFIX}*"), 100).await?;
        let removed = self.pool.delete_many(&keys).await?;
        tracing::info!(removed, "Page cache cleared");
        Ok(removed)
    }

    async fn health_check(&self) -> CacheResult<()> {
        self.pool.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefix() {
        assert_eq!(RedisPageCache::key("/?page=2"), "page_cache:/?page=2");
    }
}
