//! In-memory media storage for tests

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use super::{check_relative, MediaResult, MediaStorage};

#[derive(Debug, Clone, Default)]
pub struct MemoryMediaStorage {
    files: Arc<DashMap<String, Vec<u8>>>,
}

impl MemoryMediaStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait]
impl MediaStorage for MemoryMediaStorage {
    async fn save(&self, path: &str, bytes: &[u8]) -> MediaResult<()> {
        check_relative(path)?;
        self.files.insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn read(&self, path: &str) -> MediaResult<Option<Vec<u8>>> {
        Ok(self.files.get(path).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, path: &str) -> MediaResult<bool> {
        Ok(self.files.remove(path).is_some())
    }
}
