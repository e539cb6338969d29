//! API integration tests
//!
//! Every test spawns its own server over in-memory backends; no external
//! services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use integration_tests::{
    assert_json, assert_login_redirect, assert_status, create_post, fixtures::*, follow_feed,
    profile, TestServer,
};
use reqwest::StatusCode;
use yatube_service::{CreateGroupRequest, GroupService};

const PNG_HEADER: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];

async fn start() -> TestServer {
    TestServer::start().await.expect("Failed to start server")
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let server = start().await;

    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let ready: serde_json::Value =
        assert_json(server.get("/health/ready").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(ready["checks"]["database"], true);
    assert_eq!(ready["checks"]["cache"], true);
}

// ============================================================================
// Accounts
// ============================================================================

#[tokio::test]
async fn test_signup_login_refresh_logout() {
    let server = start().await;
    let request = SignupRequest::named("leo");

    let session: AuthResponse = assert_json(
        server.post("/auth/signup", &request).await.unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();
    assert_eq!(session.user.username, request.username);
    assert_eq!(session.user.email, request.email);
    assert_eq!(session.token_type, "Bearer");

    let response = server.post("/auth/signup", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let login = LoginRequest {
        username: request.username.clone(),
        password: TEST_PASSWORD.to_string(),
    };
    let session: AuthResponse =
        assert_json(server.post("/auth/login", &login).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();

    let wrong = LoginRequest {
        username: request.username.clone(),
        password: "not-the-password".to_string(),
    };
    let response = server.post("/auth/login", &wrong).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let body = serde_json::json!({ "refresh_token": session.refresh_token });
    let refreshed: AuthResponse =
        assert_json(server.post("/auth/refresh", &body).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(refreshed.user.id, session.user.id);

    // The rotated-out refresh token is dead
    let response = server.post("/auth/refresh", &body).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post_empty("/auth/logout", Some(&refreshed.access_token))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let body = serde_json::json!({ "refresh_token": refreshed.refresh_token });
    let response = server.post("/auth/refresh", &body).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_login_entry_point() {
    let server = start().await;

    let body: serde_json::Value =
        assert_json(server.get("/auth/login").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(body["method"], "POST");
    assert_eq!(body["endpoint"], "/auth/login");
}

#[tokio::test]
async fn test_password_change() {
    let server = start().await;
    let session = signup(&server, "leo").await.unwrap();

    let body = serde_json::json!({
        "old_password": TEST_PASSWORD,
        "new_password": "anna-karenina-1877",
    });
    let response = server
        .post_auth("/auth/password_change", &session.access_token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let old = LoginRequest {
        username: session.user.username.clone(),
        password: TEST_PASSWORD.to_string(),
    };
    let response = server.post("/auth/login", &old).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let new = LoginRequest {
        username: session.user.username,
        password: "anna-karenina-1877".to_string(),
    };
    let response = server.post("/auth/login", &new).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_current_user_and_account_deletion() {
    let server = start().await;
    let author = signup(&server, "leo").await.unwrap();
    let reader = signup(&server, "fyodor").await.unwrap();

    let me: CurrentUser = assert_json(
        server.get_auth("/users/@me", &author.access_token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(me.id, author.user.id);

    let post = create_post(&server, &author.access_token, "Soon gone").await.unwrap();
    let path = format!("/profile/{}/follow", author.user.username);
    server.post_empty(&path, Some(&reader.access_token)).await.unwrap();

    let response = server
        .delete_auth("/users/@me", &author.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&format!("/posts/{}", post.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
    let response = server
        .get(&format!("/profile/{}", author.user.username))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(follow_feed(&server, &reader.access_token).await.unwrap().total, 0);
}

// ============================================================================
// Posts
// ============================================================================

#[tokio::test]
async fn test_authenticated_create_adds_one_post() {
    let server = start().await;
    let session = signup(&server, "leo").await.unwrap();
    let username = &session.user.username;

    let before = profile(&server, username, None).await.unwrap().posts_count;
    let post = create_post(&server, &session.access_token, "Hello, Yatube").await.unwrap();

    assert_eq!(post.author.id, session.user.id);
    assert_eq!(post.text, "Hello, Yatube");
    assert_eq!(profile(&server, username, None).await.unwrap().posts_count, before + 1);
}

#[tokio::test]
async fn test_anonymous_create_redirects_and_changes_nothing() {
    let server = start().await;
    let session = signup(&server, "leo").await.unwrap();
    create_post(&server, &session.access_token, "Only post").await.unwrap();

    let response = server
        .post("/create", &PostRequest::text("Sneaky"))
        .await
        .unwrap();
    assert_login_redirect(&response);

    let index = server.get("/?page=1").await.unwrap();
    let page: PageResponse = assert_json(index, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn test_anonymous_writes_redirect_before_reading_the_body() {
    let server = start().await;
    let session = signup(&server, "leo").await.unwrap();
    let post = create_post(&server, &session.access_token, "Only post").await.unwrap();

    for path in [
        "/create".to_string(),
        format!("/posts/{}/edit", post.id),
        format!("/posts/{}/comment", post.id),
    ] {
        assert_login_redirect(&server.post_empty(&path, None).await.unwrap());
        assert_login_redirect(
            &server
                .post_raw(&path, "application/json", r#"{"text":""}"#)
                .await
                .unwrap(),
        );
        assert_login_redirect(
            &server
                .post_raw(&path, "application/x-www-form-urlencoded", "text=hi")
                .await
                .unwrap(),
        );
    }

    let detail: PostDetailResponse = assert_json(
        server.get(&format!("/posts/{}", post.id)).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(detail.post.text, "Only post");
    assert!(detail.comments.is_empty());
    assert_eq!(detail.author_posts_count, 1);
}

#[tokio::test]
async fn test_deleted_account_token_cannot_write() {
    let server = start().await;
    let leo = signup(&server, "leo").await.unwrap();
    let fyodor = signup(&server, "fyodor").await.unwrap();
    let post = create_post(&server, &fyodor.access_token, "Still here").await.unwrap();

    let response = server.delete_auth("/users/@me", &leo.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .post_auth("/create", &leo.access_token, &PostRequest::text("ghost"))
        .await
        .unwrap();
    assert_login_redirect(&response);

    let response = server
        .post_auth(
            &format!("/posts/{}/comment", post.id),
            &leo.access_token,
            &CommentRequest {
                text: "boo".to_string(),
            },
        )
        .await
        .unwrap();
    assert_login_redirect(&response);

    let follow_path = format!("/profile/{}/follow", fyodor.user.username);
    let response = server
        .post_empty(&follow_path, Some(&leo.access_token))
        .await
        .unwrap();
    assert_login_redirect(&response);

    let index: PageResponse = assert_json(server.get("/").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(index.total, 1);
    let detail: PostDetailResponse = assert_json(
        server.get(&format!("/posts/{}", post.id)).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(detail.comments.is_empty());
}

#[tokio::test]
async fn test_edit_is_author_only() {
    let server = start().await;
    let author = signup(&server, "leo").await.unwrap();
    let other = signup(&server, "fyodor").await.unwrap();

    let post = create_post(&server, &author.access_token, "Original").await.unwrap();
    let edit_path = format!("/posts/{}/edit", post.id);
    let detail_path = format!("/posts/{}", post.id);

    let response = server
        .post_auth(&edit_path, &other.access_token, &PostRequest::text("Hijacked"))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "NOT_POST_AUTHOR");

    let response = server.post(&edit_path, &PostRequest::text("Hijacked")).await.unwrap();
    assert_login_redirect(&response);

    let detail: PostDetailResponse =
        assert_json(server.get(&detail_path).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(detail.post.text, "Original");

    let edited: PostResponse = assert_json(
        server
            .post_auth(&edit_path, &author.access_token, &PostRequest::text("Edited"))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(edited.id, post.id);
    assert_eq!(edited.text, "Edited");
    assert_eq!(edited.created_at, post.created_at);

    let profile = profile(&server, &author.user.username, None).await.unwrap();
    assert_eq!(profile.posts_count, 1);

    let response = server
        .post_auth("/posts/424242/edit", &author.access_token, &PostRequest::text("x"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_empty_text_is_rejected() {
    let server = start().await;
    let session = signup(&server, "leo").await.unwrap();

    let response = server
        .post_auth("/create", &session.access_token, &PostRequest::text("   "))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_post_in_group_and_group_feed() {
    let server = start().await;
    let session = signup(&server, "leo").await.unwrap();
    let cats = GroupService::new(server.context())
        .create_group(CreateGroupRequest {
            title: "Cats".to_string(),
            slug: "cats".to_string(),
            description: "All about cats".to_string(),
        })
        .await
        .unwrap();

    let groups: Vec<GroupResponse> =
        assert_json(server.get("/groups").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].id, cats.id);

    let request = PostRequest {
        group_id: Some(cats.id.clone()),
        ..PostRequest::text("Meow")
    };
    let post: PostResponse = assert_json(
        server
            .post_auth("/create", &session.access_token, &request)
            .await
            .unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();
    assert_eq!(post.group.map(|g| g.slug), Some("cats".to_string()));
    create_post(&server, &session.access_token, "Not about cats").await.unwrap();

    let feed: GroupFeedResponse =
        assert_json(server.get("/group/cats").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(feed.group.title, "Cats");
    assert_eq!(feed.page.total, 1);
    assert_eq!(feed.page.items[0].text, "Meow");

    let response = server.get("/group/dogs").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_image_upload_and_download() {
    let server = start().await;
    let session = signup(&server, "leo").await.unwrap();

    let request = PostRequest {
        image: Some(ImageUpload {
            filename: "small.png".to_string(),
            data: STANDARD.encode(PNG_HEADER),
        }),
        ..PostRequest::text("With a picture")
    };
    let post: PostResponse = assert_json(
        server
            .post_auth("/create", &session.access_token, &request)
            .await
            .unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();

    let image = post.image.expect("image path");
    let response = server.get(&format!("/media/{image}")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
    assert_eq!(response.bytes().await.unwrap().as_ref(), PNG_HEADER);

    let response = server.get("/media/posts/missing.png").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Comments
// ============================================================================

#[tokio::test]
async fn test_comments() {
    let server = start().await;
    let author = signup(&server, "leo").await.unwrap();
    let reader = signup(&server, "fyodor").await.unwrap();
    let post = create_post(&server, &author.access_token, "Discuss").await.unwrap();
    let comment_path = format!("/posts/{}/comment", post.id);

    let body = CommentRequest {
        text: "First!".to_string(),
    };
    let response = server.post(&comment_path, &body).await.unwrap();
    assert_login_redirect(&response);

    let comment: CommentResponse = assert_json(
        server
            .post_auth(&comment_path, &reader.access_token, &body)
            .await
            .unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();
    assert_eq!(comment.post_id, post.id);
    assert_eq!(comment.author.id, reader.user.id);

    let detail: PostDetailResponse = assert_json(
        server.get(&format!("/posts/{}", post.id)).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].text, "First!");
    assert_eq!(detail.author_posts_count, 1);

    let response = server
        .post_auth("/posts/99999/comment", &reader.access_token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_nineteen_posts_paginate_ten_and_nine() {
    let server = start().await;
    let session = signup(&server, "leo").await.unwrap();
    for i in 0..19 {
        create_post(&server, &session.access_token, &format!("Post {i}"))
            .await
            .unwrap();
    }
    let path = format!("/profile/{}", session.user.username);

    let first: ProfileResponse =
        assert_json(server.get(&path).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(first.page.items.len(), 10);
    assert_eq!(first.page.num_pages, 2);
    assert!(first.page.has_next);
    assert_eq!(first.page.items[0].text, "Post 18");

    let second: ProfileResponse = assert_json(
        server.get(&format!("{path}?page=2")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(second.page.items.len(), 9);
    assert!(second.page.has_previous);
    assert!(!second.page.has_next);

    // Unusable page values never fail
    for (query, expected) in [("abc", 1), ("99", 2), ("-1", 2), ("", 1)] {
        let page: ProfileResponse = assert_json(
            server.get(&format!("{path}?page={query}")).await.unwrap(),
            StatusCode::OK,
        )
        .await
        .unwrap();
        assert_eq!(page.page.number, expected, "page={query}");
    }
}

// ============================================================================
// Follows
// ============================================================================

#[tokio::test]
async fn test_follow_is_idempotent_and_unfollow_is_a_no_op() {
    let server = start().await;
    let reader = signup(&server, "fyodor").await.unwrap();
    let author = signup(&server, "leo").await.unwrap();
    create_post(&server, &author.access_token, "Chapter one").await.unwrap();

    let follow_path = format!("/profile/{}/follow", author.user.username);
    let unfollow_path = format!("/profile/{}/unfollow", author.user.username);

    for _ in 0..2 {
        let state: FollowResponse = assert_json(
            server
                .post_empty(&follow_path, Some(&reader.access_token))
                .await
                .unwrap(),
            StatusCode::OK,
        )
        .await
        .unwrap();
        assert!(state.following);
    }
    assert_eq!(follow_feed(&server, &reader.access_token).await.unwrap().total, 1);
    assert!(profile(&server, &author.user.username, Some(&reader.access_token))
        .await
        .unwrap()
        .following);

    for _ in 0..2 {
        let state: FollowResponse = assert_json(
            server
                .post_empty(&unfollow_path, Some(&reader.access_token))
                .await
                .unwrap(),
            StatusCode::OK,
        )
        .await
        .unwrap();
        assert!(!state.following);
    }
    assert_eq!(follow_feed(&server, &reader.access_token).await.unwrap().total, 0);

    let response = server.post_empty(&follow_path, None).await.unwrap();
    assert_login_redirect(&response);

    let self_follow = format!("/profile/{}/follow", reader.user.username);
    let state: FollowResponse = assert_json(
        server
            .post_empty(&self_follow, Some(&reader.access_token))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(!state.following);
}

#[tokio::test]
async fn test_new_post_reaches_followers_only() {
    let server = start().await;
    let follower = signup(&server, "anna").await.unwrap();
    let bystander = signup(&server, "boris").await.unwrap();
    let author = signup(&server, "leo").await.unwrap();

    let follow_path = format!("/profile/{}/follow", author.user.username);
    server
        .post_empty(&follow_path, Some(&follower.access_token))
        .await
        .unwrap();

    let follower_before = follow_feed(&server, &follower.access_token).await.unwrap().total;
    let bystander_before = follow_feed(&server, &bystander.access_token).await.unwrap().total;

    let post = create_post(&server, &author.access_token, "Fresh chapter").await.unwrap();

    let feed = follow_feed(&server, &follower.access_token).await.unwrap();
    assert_eq!(feed.total, follower_before + 1);
    assert_eq!(feed.items[0].id, post.id);
    assert_eq!(
        follow_feed(&server, &bystander.access_token).await.unwrap().total,
        bystander_before
    );

    let response = server.get("/follow").await.unwrap();
    assert_login_redirect(&response);
}

// ============================================================================
// Index page cache
// ============================================================================

#[tokio::test]
async fn test_index_is_cached_until_cleared() {
    let server = start().await;
    let session = signup(&server, "leo").await.unwrap();
    create_post(&server, &session.access_token, "Before the cache").await.unwrap();

    let first = server.get("/").await.unwrap();
    assert_eq!(first.headers()["x-cache"], "MISS");
    let first = first.bytes().await.unwrap();

    create_post(&server, &session.access_token, "Hidden by the cache").await.unwrap();

    let second = server.get("/").await.unwrap();
    assert_eq!(second.headers()["x-cache"], "HIT");
    assert_eq!(second.bytes().await.unwrap(), first);

    let response = server.post_empty("/cache/clear", None).await.unwrap();
    assert_login_redirect(&response);

    let response = server
        .post_empty("/cache/clear", Some(&session.access_token))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let third = server.get("/").await.unwrap();
    assert_eq!(third.headers()["x-cache"], "MISS");
    let third = third.bytes().await.unwrap();
    assert_ne!(third, first);

    let page: PageResponse = serde_json::from_slice(&third).unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].text, "Hidden by the cache");
}

#[tokio::test]
async fn test_image_size_follows_configured_limit() {
    let server = start().await;
    let session = signup(&server, "leo").await.unwrap();

    let image_of = |size: usize| {
        let mut bytes = PNG_HEADER.to_vec();
        bytes.resize(size, 0);
        STANDARD.encode(bytes)
    };

    let request = PostRequest {
        text: "Three megabytes of cat".to_string(),
        group_id: None,
        image: Some(ImageUpload {
            filename: "big.png".to_string(),
            data: image_of(3 * 1024 * 1024),
        }),
    };
    let response = server
        .post_auth("/create", &session.access_token, &request)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let image = post.image.expect("image path");
    let stored = server.get(&format!("/media/{image}")).await.unwrap();
    assert_eq!(stored.bytes().await.unwrap().len(), 3 * 1024 * 1024);

    let request = PostRequest {
        text: "Too much cat".to_string(),
        group_id: None,
        image: Some(ImageUpload {
            filename: "huge.png".to_string(),
            data: image_of(8 * 1024 * 1024),
        }),
    };
    let response = server
        .post_auth("/create", &session.access_token, &request)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::PAYLOAD_TOO_LARGE).await.unwrap();
    assert_eq!(error.error.code, "PAYLOAD_TOO_LARGE");

    let page: PageResponse = assert_json(server.get("/").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}
