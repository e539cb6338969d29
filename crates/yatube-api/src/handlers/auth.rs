//! Authentication handlers
//!
//! Sign-up, login, token refresh, logout and password change.

use axum::{extract::State, Json};
use yatube_service::{
    AuthResponse, AuthService, LoginEntryResponse, LoginRequest, LogoutRequest,
    PasswordChangeRequest, RefreshTokenRequest, RegisterRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new user
///
/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let response = AuthService::new(state.service_context())
        .register(request)
        .await?;
    Ok(Created(Json(response)))
}

/// Where anonymous users are redirected; explains how to log in
///
/// GET /auth/login
pub async fn login_entry() -> Json<LoginEntryResponse> {
    Json(LoginEntryResponse::default())
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = AuthService::new(state.service_context())
        .login(request)
        .await?;
    Ok(Json(response))
}

/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = AuthService::new(state.service_context())
        .refresh_tokens(request)
        .await?;
    Ok(Json(response))
}

/// Revoke the given refresh token, or every token of the user without a body
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Option<Json<LogoutRequest>>,
) -> ApiResult<NoContent> {
    let refresh_token = body.and_then(|Json(b)| b.refresh_token);
    AuthService::new(state.service_context())
        .logout(auth.user_id, refresh_token)
        .await?;
    Ok(NoContent)
}

/// POST /auth/password_change
pub async fn password_change(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<PasswordChangeRequest>,
) -> ApiResult<NoContent> {
    AuthService::new(state.service_context())
        .change_password(auth.user_id, request)
        .await?;
    Ok(NoContent)
}
