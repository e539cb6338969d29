//! Account handlers

use axum::{extract::State, Json};
use yatube_service::{CurrentUserResponse, UserService};

use crate::extractors::AuthUser;
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let response = UserService::new(state.service_context())
        .get_current_user(auth.user_id)
        .await?;
    Ok(Json(response))
}

/// Delete the account with its posts, comments and follows
///
/// DELETE /users/@me
pub async fn delete_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<NoContent> {
    UserService::new(state.service_context())
        .delete_account(auth.actor())
        .await?;
    Ok(NoContent)
}
