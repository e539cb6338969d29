//! # yatube-db
//!
//! Storage layer implementing the `yatube-core` repository traits twice:
//!
//! - PostgreSQL via SQLx (`Pg*Repository`), with the schema under
//!   `migrations/` applied at startup by [`run_migrations`]
//! - [`MemoryStore`], a single in-process store for tests and local runs
//!
//! ```rust,ignore
//! use yatube_db::{create_pool, run_migrations, PgPostRepository, PoolConfig};
//!
//! let pool = create_pool(&PoolConfig::new(database_url)).await?;
//! run_migrations(&pool).await?;
//! let posts = PgPostRepository::new(pool);
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

pub use memory::MemoryStore;
pub use pool::{create_pool, ping, run_migrations, MIGRATIONS_DIR, PgPool, PoolConfig};
pub use repositories::{
    PgCommentRepository, PgFollowRepository, PgGroupRepository, PgPostRepository,
    PgUserRepository,
};
