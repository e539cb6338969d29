//! In-memory store
//!
//! Implements every repository trait over one shared state behind an async
//! lock. It enforces the same uniqueness constraints as the SQL schema and
//! applies the referential rules from [`yatube_core::integrity`] on delete.
//! Used by tests and single-process runs without PostgreSQL.

mod repositories;
mod state;

use std::sync::Arc;
use tokio::sync::RwLock;

use state::State;

/// Shared in-memory backend; clones share the same data
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}
