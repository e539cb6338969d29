//! # yatube-cache
//!
//! Cache layer: the Redis connection pool, the full-page response cache and
//! the refresh-token registry, each with a Redis and an in-memory backend.

pub mod page;
pub mod pool;
pub mod session;

pub use page::{page_key, MemoryPageCache, PageCache, RedisPageCache};
pub use pool::{CacheError, CacheResult, RedisPool, RedisPoolConfig};
pub use session::{
    MemoryRefreshTokenStore, RedisRefreshTokenStore, RefreshTokenData, RefreshTokenStore,
};
