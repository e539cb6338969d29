//! Comment service

use tracing::{info, instrument};
use yatube_core::{Actor, Comment, CommentWithAuthor, DomainError, Snowflake};

use crate::dto::{CommentRequest, CommentResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::post::clean_text;
use super::user::UserService;

pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on a post as the actor
    #[instrument(skip(self, request))]
    pub async fn add_comment(
        &self,
        actor: Actor,
        post_id: Snowflake,
        request: CommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let author = UserService::new(self.ctx).require_user(actor).await?;
        if self.ctx.post_repo().find_by_id(post_id).await?.is_none() {
            return Err(DomainError::PostNotFound(post_id).into());
        }
        let text = clean_text(&request.text)?;

        let comment = Comment::new(self.ctx.generate_id(), post_id, author.id, text);
        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, post_id = %post_id, "Comment added");

        Ok(CommentResponse::from(CommentWithAuthor { comment, author }))
    }
}
