//! Server setup and initialization
//!
//! Wires configuration into backends, builds the router and serves it.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use yatube_cache::{RedisPageCache, RedisPool, RedisPoolConfig, RedisRefreshTokenStore};
use yatube_common::{AppConfig, AppError, JwtService};
use yatube_core::SnowflakeGenerator;
use yatube_db::{
    create_pool, run_migrations, PgCommentRepository, PgFollowRepository, PgGroupRepository,
    PgPostRepository, PgUserRepository, PoolConfig,
};
use yatube_service::{LocalMediaStorage, ServiceContextBuilder, ServiceSettings};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Application with the base middleware stack
pub fn create_app(state: AppState) -> Router {
    let router = create_router(max_image_bytes(&state));
    apply_middleware(router.merge(health_routes())).with_state(state)
}

/// Application with rate limiting and configured CORS; health probes are exempt
pub fn create_app_with_config(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(max_image_bytes(&state)),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    api.merge(apply_middleware(health_routes())).with_state(state)
}

fn max_image_bytes(state: &AppState) -> usize {
    state.service_context().settings().max_image_bytes
}

fn jwt_service(config: &AppConfig) -> Arc<JwtService> {
    Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ))
}

fn settings(config: &AppConfig) -> ServiceSettings {
    ServiceSettings::from_config(&config.feed, &config.storage)
}

/// Connect PostgreSQL and Redis, apply migrations and build the state
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL ready");

    info!("Connecting to Redis...");
    let redis_pool = RedisPool::new(RedisPoolConfig::from(&config.redis))
        .map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis pool ready");

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .group_repo(Arc::new(PgGroupRepository::new(pool.clone())))
        .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .follow_repo(Arc::new(PgFollowRepository::new(pool.clone())))
        .pool(pool)
        .page_cache(Arc::new(RedisPageCache::new(redis_pool.clone())))
        .refresh_token_store(Arc::new(RedisRefreshTokenStore::new(redis_pool)))
        .media_storage(Arc::new(LocalMediaStorage::new(&config.storage.upload_dir)))
        .jwt_service(jwt_service(&config))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
        .settings(settings(&config))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// State over in-process stores; nothing survives a restart
pub fn create_in_memory_state(config: AppConfig) -> Result<AppState, AppError> {
    let service_context = ServiceContextBuilder::new()
        .in_memory()
        .jwt_service(jwt_service(&config))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
        .settings(settings(&config))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    run_server(create_app_with_config(state), &addr).await
}
