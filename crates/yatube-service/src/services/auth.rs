//! Authentication service
//!
//! Handles registration, login, token refresh, logout and password change.
//! Refresh tokens are honoured only while their `jti` is registered in the
//! refresh-token store.

use std::time::Duration;

use tracing::{info, instrument, warn};
use yatube_cache::RefreshTokenData;
use yatube_common::{hash_password, validate_password_strength, verify_password, AppError};
use yatube_core::{DomainError, Snowflake, User};

use crate::dto::{
    AuthResponse, LoginRequest, PasswordChangeRequest, RefreshTokenRequest, RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and log them in
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let username = request.username.trim().to_string();
        if !User::is_valid_username(&username) {
            return Err(DomainError::InvalidUsername(
                "letters, digits and @/./+/-/_ only, at most 150 characters".to_string(),
            )
            .into());
        }
        let email = request.email.trim().to_lowercase();

        validate_password_strength(&request.password, &username)?;

        if self.ctx.user_repo().username_exists(&username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        let user = User::new(self.ctx.generate_id(), username, email)
            .with_name(request.first_name.trim(), request.last_name.trim());
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");

        self.issue_tokens(&user).await
    }

    /// Login with username and password
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(request.username.trim())
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown username");
                ServiceError::from(DomainError::InvalidCredentials)
            })?;

        self.check_password(user.id, &request.password).await?;

        info!(user_id = %user.id, "User logged in");

        self.issue_tokens(&user).await
    }

    /// Exchange a registered refresh token for a new pair; the old one is revoked
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let registered = self.ctx.refresh_token_store().get(&claims.jti).await?;
        if !registered.is_some_and(|data| data.user_id == user_id) {
            warn!(user_id = %user_id, "Refresh with unregistered token");
            return Err(AppError::InvalidToken.into());
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        self.ctx.refresh_token_store().revoke(&claims.jti).await?;

        info!(user_id = %user.id, "Tokens refreshed");

        self.issue_tokens(&user).await
    }

    /// Revoke one refresh token, or all of the user's tokens when none is given
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(&self, user_id: Snowflake, refresh_token: Option<String>) -> ServiceResult<()> {
        match refresh_token {
            Some(token) => {
                let claims = self.ctx.jwt_service().validate_refresh_token(&token)?;
                if claims.user_id()? != user_id {
                    return Err(AppError::InvalidToken.into());
                }
                self.ctx.refresh_token_store().revoke(&claims.jti).await?;
            }
            None => {
                self.ctx
                    .refresh_token_store()
                    .revoke_all_for_user(user_id)
                    .await?;
            }
        }

        info!(user_id = %user_id, "User logged out");
        Ok(())
    }

    /// Change the password; every refresh token of the user is revoked
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: Snowflake,
        request: PasswordChangeRequest,
    ) -> ServiceResult<()> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        self.check_password(user.id, &request.old_password).await?;
        validate_password_strength(&request.new_password, &user.username)?;

        let password_hash = hash_password(&request.new_password)?;
        self.ctx
            .user_repo()
            .update_password(user.id, &password_hash)
            .await?;
        let revoked = self
            .ctx
            .refresh_token_store()
            .revoke_all_for_user(user.id)
            .await?;

        info!(user_id = %user.id, revoked, "Password changed");
        Ok(())
    }

    /// Validate an access token and return the user ID
    pub fn validate_token(&self, token: &str) -> ServiceResult<Snowflake> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        Ok(claims.user_id()?)
    }

    async fn check_password(&self, user_id: Snowflake, password: &str) -> ServiceResult<()> {
        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "No password hash stored");
                ServiceError::from(DomainError::InvalidCredentials)
            })?;

        if verify_password(password, &password_hash)? {
            Ok(())
        } else {
            warn!(user_id = %user_id, "Invalid password");
            Err(DomainError::InvalidCredentials.into())
        }
    }

    async fn issue_tokens(&self, user: &User) -> ServiceResult<AuthResponse> {
        let tokens = self.ctx.jwt_service().issue(user.id)?;
        let ttl = Duration::from_secs(self.ctx.jwt_service().refresh_token_expiry().max(0) as u64);

        self.ctx
            .refresh_token_store()
            .store(&tokens.refresh_jti, &RefreshTokenData::new(user.id), ttl)
            .await?;

        Ok(AuthResponse::new(tokens, user))
    }
}
