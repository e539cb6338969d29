//! User service
//!
//! Profile lookups and account deletion.

use tracing::{info, instrument, warn};
use yatube_core::{Actor, DomainError, Snowflake, User};

use crate::dto::CurrentUserResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Look up a user by username; unknown names are not found
    pub async fn by_username(&self, username: &str) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()).into())
    }

    /// The actor's account; a token whose user has been deleted counts as logged out
    pub async fn require_user(&self, actor: Actor) -> ServiceResult<User> {
        let user_id = actor.require_authenticated()?;
        match self.ctx.user_repo().find_by_id(user_id).await? {
            Some(user) => Ok(user),
            None => {
                warn!(user_id = %user_id, "Actor refers to a deleted account");
                Err(DomainError::LoginRequired.into())
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(CurrentUserResponse::from(&user))
    }

    /// Delete the actor's account
    ///
    /// Posts, comments and follow edges go with it; every refresh token is
    /// revoked.
    #[instrument(skip(self))]
    pub async fn delete_account(&self, actor: Actor) -> ServiceResult<()> {
        let user_id = self.require_user(actor).await?.id;

        self.ctx.user_repo().delete(user_id).await?;
        let revoked = self
            .ctx
            .refresh_token_store()
            .revoke_all_for_user(user_id)
            .await?;

        info!(user_id = %user_id, revoked, "Account deleted");
        Ok(())
    }
}
