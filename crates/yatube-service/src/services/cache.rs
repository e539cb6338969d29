//! Index page cache
//!
//! The index listing is rendered to JSON once and served from the page cache
//! for the configured lifetime. Writes never invalidate it; only an explicit
//! clear does.

use tracing::{debug, info, instrument, warn};
use yatube_cache::page_key;
use yatube_core::Actor;

use crate::dto::CacheClearResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::feed::FeedService;

/// A rendered response body and whether it came from the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub body: Vec<u8>,
    pub cache_hit: bool,
}

pub struct PageCacheService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PageCacheService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Index listing for `path?query`, cached per path and query string
    ///
    /// A cache backend failure is logged and the page is rendered fresh.
    #[instrument(skip(self))]
    pub async fn index_page(
        &self,
        path: &str,
        query: Option<&str>,
        page: Option<&str>,
    ) -> ServiceResult<RenderedPage> {
        let key = page_key(path, query);

        match self.ctx.page_cache().get(&key).await {
            Ok(Some(body)) => {
                debug!(key = %key, "Page cache hit");
                return Ok(RenderedPage {
                    body,
                    cache_hit: true,
                });
            }
            Ok(None) => debug!(key = %key, "Page cache miss"),
            Err(e) => warn!(key = %key, error = %e, "Page cache read failed"),
        }

        let feed = FeedService::new(self.ctx).index(page).await?;
        let body = serde_json::to_vec(&feed)?;

        if let Err(e) = self
            .ctx
            .page_cache()
            .set(&key, &body, self.ctx.settings().index_cache_ttl)
            .await
        {
            warn!(key = %key, error = %e, "Page cache write failed");
        }

        Ok(RenderedPage {
            body,
            cache_hit: false,
        })
    }

    /// Drop every cached page
    #[instrument(skip(self))]
    pub async fn clear(&self, actor: Actor) -> ServiceResult<CacheClearResponse> {
        let user_id = actor.require_authenticated()?;
        let cleared = self.ctx.page_cache().clear().await?;

        info!(user_id = %user_id, cleared, "Page cache cleared");
        Ok(CacheClearResponse { cleared })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::PostRequest;
    use crate::services::test_support::{context, context_with, create_user};
    use crate::services::{PostService, ServiceSettings};
    use std::time::Duration;

    #[tokio::test]
    async fn test_index_served_from_cache_until_cleared() {
        let ctx = context();
        let leo = create_user(&ctx, "leo").await;
        let posts = PostService::new(&ctx);
        let cache = PageCacheService::new(&ctx);
        posts
            .create_post(Actor::User(leo.id), PostRequest::text("Before"))
            .await
            .unwrap();

        let first = cache.index_page("/", None, None).await.unwrap();
        assert!(!first.cache_hit);
        let second = cache.index_page("/", None, None).await.unwrap();
        assert!(second.cache_hit);
        assert_eq!(first.body, second.body);

        posts
            .create_post(Actor::User(leo.id), PostRequest::text("After"))
            .await
            .unwrap();
        let third = cache.index_page("/", None, None).await.unwrap();
        assert_eq!(third.body, first.body);

        let cleared = cache.clear(Actor::User(leo.id)).await.unwrap();
        assert_eq!(cleared.cleared, 1);

        let fresh = cache.index_page("/", None, None).await.unwrap();
        assert!(!fresh.cache_hit);
        assert_ne!(fresh.body, first.body);
        let json: serde_json::Value = serde_json::from_slice(&fresh.body).unwrap();
        assert_eq!(json["total"], 2);
        assert_eq!(json["items"][0]["text"], "After");
    }

    #[tokio::test]
    async fn test_query_string_is_part_of_the_key() {
        let ctx = context();
        let cache = PageCacheService::new(&ctx);

        cache.index_page("/", None, None).await.unwrap();
        let other = cache.index_page("/", Some("page=2"), Some("2")).await.unwrap();
        assert!(!other.cache_hit);
        assert!(cache.index_page("/", Some("page=2"), Some("2")).await.unwrap().cache_hit);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let ctx = context_with(ServiceSettings {
            index_cache_ttl: Duration::from_millis(50),
            ..ServiceSettings::default()
        });
        let cache = PageCacheService::new(&ctx);

        cache.index_page("/", None, None).await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(!cache.index_page("/", None, None).await.unwrap().cache_hit);
    }

    #[tokio::test]
    async fn test_clear_requires_login() {
        let ctx = context();
        let err = PageCacheService::new(&ctx)
            .clear(Actor::Anonymous)
            .await
            .unwrap_err();
        assert!(err.is_login_required());
    }
}
