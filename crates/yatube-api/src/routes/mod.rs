//! Route definitions

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, cache, feeds, health, media, posts, users};
use crate::state::AppState;

/// Room for the post text and JSON framing next to an encoded image
const POST_BODY_SLACK: usize = 64 * 1024;

/// Largest post body: the image as base64 plus [`POST_BODY_SLACK`]
pub fn post_body_limit(max_image_bytes: usize) -> usize {
    max_image_bytes.div_ceil(3) * 4 + POST_BODY_SLACK
}

/// Every application route except the health probes
///
/// `max_image_bytes` sizes the request body limit of the post routes.
pub fn create_router(max_image_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(feed_routes())
        .merge(post_routes(max_image_bytes))
        .merge(auth_routes())
        .merge(account_routes())
        .route("/media/*path", get(media::serve_media))
}

/// Health check routes (kept apart so they bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn feed_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(feeds::index))
        .route("/group/:slug", get(feeds::group_feed))
        .route("/profile/:username", get(feeds::profile))
        .route("/profile/:username/follow", post(feeds::profile_follow))
        .route("/profile/:username/unfollow", post(feeds::profile_unfollow))
        .route("/follow", get(feeds::follow_index))
}

fn post_routes(max_image_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/create", post(posts::post_create))
        .route("/posts/:post_id", get(posts::post_detail))
        .route("/posts/:post_id/edit", post(posts::post_edit))
        .route("/posts/:post_id/comment", post(posts::add_comment))
        .route("/groups", get(posts::list_groups))
        .layer(DefaultBodyLimit::max(post_body_limit(max_image_bytes)))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", get(auth::login_entry).post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/password_change", post(auth::password_change))
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/@me",
            get(users::get_current_user).delete(users::delete_current_user),
        )
        .route("/cache/clear", post(cache::clear_cache))
}
