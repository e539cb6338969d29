//! Group service
//!
//! Listing is public; create/update/delete are operator tooling with no
//! HTTP route.

use tracing::{info, instrument};
use yatube_core::entities::MAX_GROUP_TITLE_LEN;
use yatube_core::{DomainError, Group, Slug};

use crate::dto::{CreateGroupRequest, GroupResponse, UpdateGroupRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

fn clean_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::EmptyText);
    }
    if title.chars().count() > MAX_GROUP_TITLE_LEN {
        return Err(DomainError::ContentTooLong {
            max: MAX_GROUP_TITLE_LEN,
        });
    }
    Ok(title.to_string())
}

pub struct GroupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GroupService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All groups, ordered by title
    #[instrument(skip(self))]
    pub async fn list_groups(&self) -> ServiceResult<Vec<GroupResponse>> {
        let groups = self.ctx.group_repo().list().await?;
        Ok(groups.iter().map(GroupResponse::from).collect())
    }

    pub async fn get_group(&self, slug: &str) -> ServiceResult<Group> {
        self.ctx
            .group_repo()
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound(slug.to_string()).into())
    }

    #[instrument(skip(self, request), fields(slug = %request.slug))]
    pub async fn create_group(&self, request: CreateGroupRequest) -> ServiceResult<GroupResponse> {
        let slug = Slug::parse(request.slug.trim()).map_err(DomainError::from)?;
        let title = clean_title(&request.title)?;

        let group = Group::new(
            self.ctx.generate_id(),
            title,
            slug,
            request.description.trim().to_string(),
        );
        self.ctx.group_repo().create(&group).await?;

        info!(group_id = %group.id, slug = %group.slug, "Group created");
        Ok(GroupResponse::from(&group))
    }

    #[instrument(skip(self, request))]
    pub async fn update_group(
        &self,
        slug: &str,
        request: UpdateGroupRequest,
    ) -> ServiceResult<GroupResponse> {
        let mut group = self.get_group(slug).await?;

        let title = request.title.as_deref().map(clean_title).transpose()?;
        let new_slug = request
            .slug
            .as_deref()
            .map(|s| Slug::parse(s.trim()))
            .transpose()
            .map_err(DomainError::from)?;
        group.update(title, new_slug, request.description);

        self.ctx.group_repo().update(&group).await?;

        info!(group_id = %group.id, slug = %group.slug, "Group updated");
        Ok(GroupResponse::from(&group))
    }

    /// Delete a group; its posts stay and lose their group
    #[instrument(skip(self))]
    pub async fn delete_group(&self, slug: &str) -> ServiceResult<()> {
        let group = self.get_group(slug).await?;
        self.ctx.group_repo().delete(group.id).await?;

        info!(group_id = %group.id, "Group deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::PostRequest;
    use crate::services::test_support::{context, create_user};
    use crate::services::{PostService, ServiceError};
    use yatube_core::{Actor, Snowflake};

    fn create_request(title: &str, slug: &str) -> CreateGroupRequest {
        CreateGroupRequest {
            title: title.to_string(),
            slug: slug.to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_group_lifecycle() {
        let ctx = context();
        let service = GroupService::new(&ctx);

        service.create_group(create_request("Dogs", "dogs")).await.unwrap();
        service.create_group(create_request("Cats", "cats")).await.unwrap();

        let titles: Vec<_> = service
            .list_groups()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, ["Cats", "Dogs"]);

        let updated = service
            .update_group(
                "cats",
                UpdateGroupRequest {
                    slug: Some("felines".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.slug, "felines");
        assert_eq!(updated.title, "Cats");
        assert!(service.get_group("cats").await.is_err());
    }

    #[tokio::test]
    async fn test_group_validation() {
        let ctx = context();
        let service = GroupService::new(&ctx);
        service.create_group(create_request("Cats", "cats")).await.unwrap();

        let err = service.create_group(create_request("Cats again", "cats")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::GroupSlugExists(_))));

        let err = service.create_group(create_request("Bad", "bad slug")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::InvalidSlug(_))));

        let err = service.create_group(create_request("  ", "blank")).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = service.delete_group("missing").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_delete_group_detaches_posts() {
        let ctx = context();
        let leo = create_user(&ctx, "leo").await;
        let cats = GroupService::new(&ctx)
            .create_group(create_request("Cats", "cats"))
            .await
            .unwrap();

        let post = PostService::new(&ctx)
            .create_post(
                Actor::User(leo.id),
                PostRequest::text("Meow").in_group(Snowflake::parse(&cats.id).unwrap()),
            )
            .await
            .unwrap();
        assert!(post.group.is_some());

        GroupService::new(&ctx).delete_group("cats").await.unwrap();

        let detail = PostService::new(&ctx)
            .get_post(Actor::Anonymous, Snowflake::parse(&post.id).unwrap())
            .await
            .unwrap();
        assert!(detail.post.group.is_none());
        assert_eq!(detail.post.text, "Meow");
    }
}
