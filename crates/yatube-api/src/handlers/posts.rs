//! Post handlers
//!
//! Post detail, creation, editing, comments and the group list offered to
//! post forms. Write handlers take [`AuthUser`] ahead of the body, so an
//! anonymous request is redirected to login whatever it carries.

use axum::{extract::State, Json};
use yatube_service::{
    CommentRequest, CommentResponse, CommentService, GroupResponse, GroupService,
    PostDetailResponse, PostRequest, PostResponse, PostService,
};

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /posts/{post_id}
pub async fn post_detail(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<PostDetailResponse>> {
    let response = PostService::new(state.service_context())
        .get_post(viewer.actor(), post_id)
        .await?;
    Ok(Json(response))
}

/// POST /create
pub async fn post_create(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<PostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let response = PostService::new(state.service_context())
        .create_post(user.actor(), request)
        .await?;
    Ok(Created(Json(response)))
}

/// Only the author may edit
///
/// POST /posts/{post_id}/edit
pub async fn post_edit(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(post_id): IdPath,
    ValidatedJson(request): ValidatedJson<PostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let response = PostService::new(state.service_context())
        .edit_post(user.actor(), post_id, request)
        .await?;
    Ok(Json(response))
}

/// POST /posts/{post_id}/comment
pub async fn add_comment(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(post_id): IdPath,
    ValidatedJson(request): ValidatedJson<CommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let response = CommentService::new(state.service_context())
        .add_comment(user.actor(), post_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// GET /groups
pub async fn list_groups(State(state): State<AppState>) -> ApiResult<Json<Vec<GroupResponse>>> {
    let groups = GroupService::new(state.service_context()).list_groups().await?;
    Ok(Json(groups))
}
