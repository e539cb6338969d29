//! Full-page response cache
//!
//! Stores rendered response bodies under a request key for a fixed time.
//! Entries are never invalidated by writes; they expire, or everything is
//! dropped by an explicit [`PageCache::clear`].

mod in_memory;
mod redis_store;

use async_trait::async_trait;
use std::time::Duration;

use crate::pool::CacheResult;

pub use in_memory::MemoryPageCache;
pub use redis_store::RedisPageCache;

#[async_trait]
pub trait PageCache: Send + Sync {
    /// Cached body for `key`, if present and not expired
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Store `body` under `key` for `ttl`
    async fn set(&self, key: &str, body: &[u8], ttl: Duration) -> CacheResult<()>;

    /// Drop every cached page; returns how many were removed
    async fn clear(&self) -> CacheResult<u64>;

    async fn health_check(&self) -> CacheResult<()>;
}

/// Cache key for a request: path plus query string
pub fn page_key(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{path}?{q}"),
        _ => path.to_string(),
    }
}
