//! Session storage

mod refresh_token;

pub use refresh_token::{
    MemoryRefreshTokenStore, RedisRefreshTokenStore, RefreshTokenData, RefreshTokenStore,
};
