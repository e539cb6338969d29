//! Post service
//!
//! Creating, editing and viewing single posts.

use tracing::{debug, info, instrument, warn};
use yatube_core::policy::authorize_post_edit;
use yatube_core::entities::MAX_POST_TEXT_LEN;
use yatube_core::{Actor, DomainError, FeedQuery, Post, PostDetails, Snowflake};

use crate::dto::{CommentResponse, ImageUpload, PostDetailResponse, PostRequest, PostResponse};
use crate::media::ImageFile;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::user::UserService;

/// Trim and check user-supplied text
pub(crate) fn clean_text(text: &str) -> Result<String, DomainError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::EmptyText);
    }
    if text.chars().count() > MAX_POST_TEXT_LEN {
        return Err(DomainError::ContentTooLong {
            max: MAX_POST_TEXT_LEN,
        });
    }
    Ok(text.to_string())
}

pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish a post as the actor
    #[instrument(skip(self, request))]
    pub async fn create_post(&self, actor: Actor, request: PostRequest) -> ServiceResult<PostResponse> {
        let author_id = UserService::new(self.ctx).require_user(actor).await?.id;
        let text = clean_text(&request.text)?;
        let group_id = self.resolve_group(request.group_id).await?;

        let mut post = Post::new(self.ctx.generate_id(), author_id, text, group_id);
        if let Some(upload) = &request.image {
            post.set_image(Some(self.store_image(post.id, upload).await?));
        }

        if let Err(e) = self.ctx.post_repo().create(&post).await {
            self.discard_image(post.image.as_deref()).await;
            return Err(e.into());
        }

        info!(post_id = %post.id, author_id = %author_id, "Post created");

        self.load(post.id).await.map(PostResponse::from)
    }

    /// Edit a post; only its author may do so
    ///
    /// Checks run in order: logged in, post exists, actor is the author.
    /// A replaced image is removed from storage once the edit is saved.
    #[instrument(skip(self, request))]
    pub async fn edit_post(
        &self,
        actor: Actor,
        post_id: Snowflake,
        request: PostRequest,
    ) -> ServiceResult<PostResponse> {
        let user_id = UserService::new(self.ctx).require_user(actor).await?.id;
        let mut post = self.load(post_id).await?.post;
        authorize_post_edit(user_id, &post)?;

        let text = clean_text(&request.text)?;
        let group_id = self.resolve_group(request.group_id).await?;
        post.edit(text, group_id);

        let previous_image = post.image.clone();
        if let Some(upload) = &request.image {
            post.set_image(Some(self.store_image(post.id, upload).await?));
        }
        let image_changed = post.image != previous_image;

        if let Err(e) = self.ctx.post_repo().update(&post).await {
            if image_changed {
                self.discard_image(post.image.as_deref()).await;
            }
            return Err(e.into());
        }
        if image_changed {
            self.discard_image(previous_image.as_deref()).await;
        }

        info!(post_id = %post.id, "Post edited");

        self.load(post.id).await.map(PostResponse::from)
    }

    /// Post with its comments, the author's post count and the follow flag
    #[instrument(skip(self))]
    pub async fn get_post(&self, actor: Actor, post_id: Snowflake) -> ServiceResult<PostDetailResponse> {
        let details = self.load(post_id).await?;
        let author_id = details.author.id;

        let author_posts_count = self
            .ctx
            .post_repo()
            .count(&FeedQuery::Author(author_id))
            .await?;
        let comments = self
            .ctx
            .comment_repo()
            .find_by_post(post_id)
            .await?
            .into_iter()
            .map(CommentResponse::from)
            .collect();
        let following = match actor.user_id() {
            Some(viewer) => self.ctx.follow_repo().exists(viewer, author_id).await?,
            None => false,
        };

        Ok(PostDetailResponse {
            post: PostResponse::from(details),
            author_posts_count,
            comments,
            following,
        })
    }

    async fn load(&self, post_id: Snowflake) -> ServiceResult<PostDetails> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }

    async fn resolve_group(&self, group_id: Option<Snowflake>) -> ServiceResult<Option<Snowflake>> {
        let Some(group_id) = group_id else {
            return Ok(None);
        };
        match self.ctx.group_repo().find_by_id(group_id).await? {
            Some(group) => Ok(Some(group.id)),
            None => Err(ServiceError::validation(format!("unknown group: {group_id}"))),
        }
    }

    async fn store_image(&self, post_id: Snowflake, upload: &ImageUpload) -> ServiceResult<String> {
        let image = ImageFile::decode(&upload.data, self.ctx.settings().max_image_bytes)?;
        let path = image.storage_path(post_id, &upload.filename);
        self.ctx.media_storage().save(&path, &image.bytes).await?;

        debug!(path = %path, format = %image.format, "Post image stored");
        Ok(path)
    }

    /// Best-effort removal of an image no post refers to
    async fn discard_image(&self, path: Option<&str>) {
        let Some(path) = path else {
            return;
        };
        match self.ctx.media_storage().delete(path).await {
            Ok(_) => debug!(path = %path, "Post image removed"),
            Err(e) => warn!(path = %path, error = %e, "Failed to remove post image"),
        }
    }
}
