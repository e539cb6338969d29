//! Service context - dependency container for services
//!
//! Holds the repositories, the page cache, the refresh-token registry, media
//! storage and the settings every service reads.

use std::sync::Arc;
use std::time::Duration;

use yatube_cache::{MemoryPageCache, MemoryRefreshTokenStore, PageCache, RefreshTokenStore};
use yatube_common::{FeedConfig, JwtService, StorageConfig};
use yatube_core::traits::{
    CommentRepository, FollowRepository, GroupRepository, PostRepository, UserRepository,
};
use yatube_core::{Paginator, Snowflake, SnowflakeGenerator};
use yatube_db::{MemoryStore, PgPool};

use super::error::{ServiceError, ServiceResult};
use crate::media::{MediaStorage, MemoryMediaStorage};

/// Tunables shared by the services
#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    pub paginator: Paginator,
    /// Lifetime of a cached index page
    pub index_cache_ttl: Duration,
    pub max_image_bytes: usize,
}

impl ServiceSettings {
    pub fn from_config(feed: &FeedConfig, storage: &StorageConfig) -> Self {
        Self {
            paginator: Paginator::new(feed.posts_per_page),
            index_cache_ttl: feed.index_cache_ttl(),
            max_image_bytes: storage.max_file_size_bytes(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from_config(&FeedConfig::default(), &StorageConfig::default())
    }
}

/// Service context containing all dependencies
///
/// Cheap to clone; every service borrows it for the duration of one call.
#[derive(Clone)]
pub struct ServiceContext {
    // Present only with the PostgreSQL backend; used by readiness checks
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    group_repo: Arc<dyn GroupRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    follow_repo: Arc<dyn FollowRepository>,

    // Cache stores
    page_cache: Arc<dyn PageCache>,
    refresh_token_store: Arc<dyn RefreshTokenStore>,

    media_storage: Arc<dyn MediaStorage>,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    settings: ServiceSettings,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Database Pool ===

    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn group_repo(&self) -> &dyn GroupRepository {
        self.group_repo.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    // === Cache Stores ===

    pub fn page_cache(&self) -> &dyn PageCache {
        self.page_cache.as_ref()
    }

    pub fn refresh_token_store(&self) -> &dyn RefreshTokenStore {
        self.refresh_token_store.as_ref()
    }

    pub fn media_storage(&self) -> &dyn MediaStorage {
        self.media_storage.as_ref()
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    pub fn paginator(&self) -> Paginator {
        self.settings.paginator
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("cache_stores", &"...")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    group_repo: Option<Arc<dyn GroupRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    page_cache: Option<Arc<dyn PageCache>>,
    refresh_token_store: Option<Arc<dyn RefreshTokenStore>>,
    media_storage: Option<Arc<dyn MediaStorage>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    settings: ServiceSettings,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use one shared [`MemoryStore`] for every repository plus in-memory
    /// page cache, token registry and media storage
    pub fn in_memory(self) -> Self {
        let store = Arc::new(MemoryStore::new());
        self.user_repo(store.clone())
            .group_repo(store.clone())
            .post_repo(store.clone())
            .comment_repo(store.clone())
            .follow_repo(store)
            .page_cache(Arc::new(MemoryPageCache::new()))
            .refresh_token_store(Arc::new(MemoryRefreshTokenStore::new()))
            .media_storage(Arc::new(MemoryMediaStorage::new()))
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn group_repo(mut self, repo: Arc<dyn GroupRepository>) -> Self {
        self.group_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn page_cache(mut self, cache: Arc<dyn PageCache>) -> Self {
        self.page_cache = Some(cache);
        self
    }

    pub fn refresh_token_store(mut self, store: Arc<dyn RefreshTokenStore>) -> Self {
        self.refresh_token_store = Some(store);
        self
    }

    pub fn media_storage(mut self, storage: Arc<dyn MediaStorage>) -> Self {
        self.media_storage = Some(storage);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the ServiceContext
    ///
    /// The snowflake generator defaults to worker 0; everything else is required.
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if a required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext {
            pool: self.pool,
            user_repo: required(self.user_repo, "user_repo")?,
            group_repo: required(self.group_repo, "group_repo")?,
            post_repo: required(self.post_repo, "post_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            follow_repo: required(self.follow_repo, "follow_repo")?,
            page_cache: required(self.page_cache, "page_cache")?,
            refresh_token_store: required(self.refresh_token_store, "refresh_token_store")?,
            media_storage: required(self.media_storage, "media_storage")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            snowflake_generator: self
                .snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::default())),
            settings: self.settings,
        })
    }
}
