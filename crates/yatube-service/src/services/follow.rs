//! Follow service
//!
//! Following is idempotent: a repeated follow, a self-follow and an unfollow
//! without an edge all succeed without changing anything.

use tracing::{debug, info, instrument};
use yatube_core::policy::decide_follow;
use yatube_core::{Actor, Follow, FollowDecision};

use crate::dto::FollowResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::user::UserService;

pub struct FollowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn follow(&self, actor: Actor, username: &str) -> ServiceResult<FollowResponse> {
        let user_id = UserService::new(self.ctx).require_user(actor).await?.id;
        let author = UserService::new(self.ctx).by_username(username).await?;

        let already = self.ctx.follow_repo().exists(user_id, author.id).await?;
        let following = match decide_follow(user_id, author.id, already) {
            FollowDecision::Create => {
                let created = self
                    .ctx
                    .follow_repo()
                    .create(&Follow::new(self.ctx.generate_id(), user_id, author.id))
                    .await?;
                if created {
                    info!(user_id = %user_id, author_id = %author.id, "Follow created");
                }
                true
            }
            FollowDecision::AlreadyFollowing => {
                debug!(user_id = %user_id, author_id = %author.id, "Already following");
                true
            }
            FollowDecision::SelfFollow => {
                debug!(user_id = %user_id, "Ignoring self-follow");
                false
            }
        };

        Ok(FollowResponse {
            author: author.username,
            following,
        })
    }

    #[instrument(skip(self))]
    pub async fn unfollow(&self, actor: Actor, username: &str) -> ServiceResult<FollowResponse> {
        let user_id = actor.require_authenticated()?;
        let author = UserService::new(self.ctx).by_username(username).await?;

        let removed = self.ctx.follow_repo().delete(user_id, author.id).await?;
        if removed > 0 {
            info!(user_id = %user_id, author_id = %author.id, "Follow removed");
        }

        Ok(FollowResponse {
            author: author.username,
            following: false,
        })
    }
}
