//! Feed handlers
//!
//! The index (served through the page cache), group and profile listings,
//! the follow feed and follow/unfollow.

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderValue, Uri},
    response::{IntoResponse, Response},
    Json,
};
use yatube_service::{
    FeedResponse, FeedService, FollowResponse, FollowService, GroupFeedResponse, PageCacheService,
    ProfileResponse,
};

use crate::extractors::{OptionalAuthUser, PageParam};
use crate::response::ApiResult;
use crate::state::AppState;

/// Tells clients whether the index body came from the page cache
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Latest posts from everyone; identical bodies within the cache lifetime
///
/// GET /
pub async fn index(
    State(state): State<AppState>,
    uri: Uri,
    RawQuery(query): RawQuery,
    page: PageParam,
) -> ApiResult<Response> {
    let rendered = PageCacheService::new(state.service_context())
        .index_page(uri.path(), query.as_deref(), page.as_deref())
        .await?;

    let cache_status = if rendered.cache_hit { "HIT" } else { "MISS" };
    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ),
            (
                header::HeaderName::from_static(CACHE_STATUS_HEADER),
                HeaderValue::from_static(cache_status),
            ),
        ],
        rendered.body,
    )
        .into_response())
}

/// GET /group/{slug}
pub async fn group_feed(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    page: PageParam,
) -> ApiResult<Json<GroupFeedResponse>> {
    let response = FeedService::new(state.service_context())
        .group_feed(&slug, page.as_deref())
        .await?;
    Ok(Json(response))
}

/// GET /profile/{username}
pub async fn profile(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(username): Path<String>,
    page: PageParam,
) -> ApiResult<Json<ProfileResponse>> {
    let response = FeedService::new(state.service_context())
        .profile(viewer.actor(), &username, page.as_deref())
        .await?;
    Ok(Json(response))
}

/// Posts by followed authors
///
/// GET /follow
pub async fn follow_index(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    page: PageParam,
) -> ApiResult<Json<FeedResponse>> {
    let response = FeedService::new(state.service_context())
        .follow_feed(viewer.actor(), page.as_deref())
        .await?;
    Ok(Json(response))
}

/// POST /profile/{username}/follow
pub async fn profile_follow(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(username): Path<String>,
) -> ApiResult<Json<FollowResponse>> {
    let response = FollowService::new(state.service_context())
        .follow(viewer.actor(), &username)
        .await?;
    Ok(Json(response))
}

/// POST /profile/{username}/unfollow
pub async fn profile_unfollow(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(username): Path<String>,
) -> ApiResult<Json<FollowResponse>> {
    let response = FollowService::new(state.service_context())
        .unfollow(viewer.actor(), &username)
        .await?;
    Ok(Json(response))
}
