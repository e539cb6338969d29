//! Feed service
//!
//! Every listing is a [`FeedQuery`] paginated the same way: count the
//! selection, resolve the untrusted page parameter, fetch one slice.

use tracing::{debug, instrument};
use yatube_core::{Actor, FeedQuery, Page, PostDetails};

use crate::dto::{
    FeedResponse, GroupFeedResponse, GroupResponse, PostResponse, ProfileResponse, UserResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::group::GroupService;
use super::user::UserService;

pub struct FeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All posts, newest first
    #[instrument(skip(self))]
    pub async fn index(&self, page: Option<&str>) -> ServiceResult<FeedResponse> {
        Ok(self.fetch(FeedQuery::All, page).await?.map(PostResponse::from).into())
    }

    /// Posts of one group; an unknown slug is not found
    #[instrument(skip(self))]
    pub async fn group_feed(&self, slug: &str, page: Option<&str>) -> ServiceResult<GroupFeedResponse> {
        let group = GroupService::new(self.ctx).get_group(slug).await?;
        let posts = self.fetch(FeedQuery::Group(group.id), page).await?;

        Ok(GroupFeedResponse {
            group: GroupResponse::from(&group),
            page: posts.map(PostResponse::from).into(),
        })
    }

    /// Posts of one author with their total and whether the viewer follows them
    #[instrument(skip(self))]
    pub async fn profile(
        &self,
        actor: Actor,
        username: &str,
        page: Option<&str>,
    ) -> ServiceResult<ProfileResponse> {
        let author = UserService::new(self.ctx).by_username(username).await?;
        let posts = self.fetch(FeedQuery::Author(author.id), page).await?;
        let following = match actor.user_id() {
            Some(viewer) => self.ctx.follow_repo().exists(viewer, author.id).await?,
            None => false,
        };

        Ok(ProfileResponse {
            author: UserResponse::from(&author),
            posts_count: posts.total,
            following,
            page: posts.map(PostResponse::from).into(),
        })
    }

    /// Posts by the authors the actor follows
    #[instrument(skip(self))]
    pub async fn follow_feed(&self, actor: Actor, page: Option<&str>) -> ServiceResult<FeedResponse> {
        let user_id = actor.require_authenticated()?;
        Ok(self
            .fetch(FeedQuery::FollowedBy(user_id), page)
            .await?
            .map(PostResponse::from)
            .into())
    }

    async fn fetch(&self, query: FeedQuery, page: Option<&str>) -> ServiceResult<Page<PostDetails>> {
        let repo = self.ctx.post_repo();
        let total = repo.count(&query).await?;
        let window = self.ctx.paginator().resolve(total, page);
        let items = repo.find_page(&query, window.offset(), window.limit()).await?;

        debug!(
            query = %query,
            page = window.number,
            num_pages = window.num_pages,
            total,
            "Feed page loaded"
        );

        Ok(window.into_page(items))
    }
}
