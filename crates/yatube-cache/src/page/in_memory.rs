//! Process-local page cache

use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};

use super::PageCache;
use crate::pool::CacheResult;

struct Entry {
    body: Vec<u8>,
    expires_at: Instant,
}

/// Page cache held in a `DashMap`
///
/// Expired entries are dropped when read and swept on every write.
#[derive(Default)]
pub struct MemoryPageCache {
    entries: DashMap<String, Entry>,
}

impl MemoryPageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl PageCache for MemoryPageCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > now {
                return Ok(Some(entry.body.clone()));
            }
        }
        self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        Ok(None)
    }

    async fn set(&self, key: &str, body: &[u8], ttl: Duration) -> CacheResult<()> {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.expires_at > now);
        self.entries.insert(
            key.to_string(),
            Entry {
                body: body.to_vec(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn clear(&self) -> CacheResult<u64> {
        let count = self.entries.len() as u64;
        self.entries.clear();
        Ok(count)
    }

    async fn health_check(&self) -> CacheResult<()> {
        Ok(())
    }
}
