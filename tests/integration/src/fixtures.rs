//! Test fixtures
//!
//! Request bodies, response shapes and a few flows shared by the tests.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::helpers::{assert_json, TestServer};

static COUNTER: AtomicU64 = AtomicU64::new(1);

pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub const TEST_PASSWORD: &str = "war-and-peace-1869";

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn named(prefix: &str) -> Self {
        let username = format!("{prefix}{}", unique_suffix());
        Self {
            email: format!("{username}@example.com"),
            username,
            password: TEST_PASSWORD.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct PostRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageUpload>,
}

impl PostRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageUpload {
    pub filename: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct CommentRequest {
    pub text: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: CurrentUser,
}

#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct GroupResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub text: String,
    pub author: UserResponse,
    pub group: Option<GroupResponse>,
    pub image: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author: UserResponse,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub author_posts_count: u64,
    pub comments: Vec<CommentResponse>,
    pub following: bool,
}

#[derive(Debug, Deserialize)]
pub struct PageResponse {
    pub items: Vec<PostResponse>,
    pub number: u64,
    pub num_pages: u64,
    pub total: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

#[derive(Debug, Deserialize)]
pub struct GroupFeedResponse {
    pub group: GroupResponse,
    pub page: PageResponse,
}

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub author: UserResponse,
    pub posts_count: u64,
    pub following: bool,
    pub page: PageResponse,
}

#[derive(Debug, Deserialize)]
pub struct FollowResponse {
    pub author: String,
    pub following: bool,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

// ============================================================================
// Flows
// ============================================================================

/// Register a fresh user and return their session
pub async fn signup(server: &TestServer, prefix: &str) -> Result<AuthResponse> {
    let response = server
        .post("/auth/signup", &SignupRequest::named(prefix))
        .await?;
    assert_json(response, StatusCode::CREATED).await
}

pub async fn create_post(server: &TestServer, token: &str, text: &str) -> Result<PostResponse> {
    let response = server
        .post_auth("/create", token, &PostRequest::text(text))
        .await?;
    assert_json(response, StatusCode::CREATED).await
}

pub async fn profile(server: &TestServer, username: &str, token: Option<&str>) -> Result<ProfileResponse> {
    let path = format!("/profile/{username}");
    let response = match token {
        Some(token) => server.get_auth(&path, token).await?,
        None => server.get(&path).await?,
    };
    assert_json(response, StatusCode::OK).await
}

pub async fn follow_feed(server: &TestServer, token: &str) -> Result<PageResponse> {
    let response = server.get_auth("/follow", token).await?;
    assert_json(response, StatusCode::OK).await
}
