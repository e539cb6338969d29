//! Repository traits over [`MemoryStore`]

use async_trait::async_trait;

use yatube_core::entities::{
    sort_newest_first, Comment, CommentWithAuthor, Follow, Group, Post, PostDetails, User,
};
use yatube_core::error::DomainError;
use yatube_core::feed::FeedQuery;
use yatube_core::integrity::EntityKind;
use yatube_core::traits::{
    CommentRepository, FollowRepository, GroupRepository, PostRepository, RepoResult,
    UserRepository,
};
use yatube_core::value_objects::Snowflake;

use super::state::{State, UserRow};
use super::MemoryStore;

fn fk_violation(what: &str) -> DomainError {
    DomainError::DatabaseError(format!("foreign key violation: {what}"))
}

impl State {
    fn details(&self, post: &Post) -> Option<PostDetails> {
        let author = self.users.get(&post.author_id)?.user.clone();
        let group = post.group_id.and_then(|id| self.groups.get(&id).cloned());
        Some(PostDetails {
            post: post.clone(),
            author,
            group,
        })
    }

    fn feed(&self, query: &FeedQuery) -> Vec<PostDetails> {
        let mut posts: Vec<PostDetails> = self
            .posts
            .values()
            .filter(|p| query.matches(p.author_id, p.group_id, |u, a| self.follows(u, a)))
            .filter_map(|p| self.details(p))
            .collect();
        sort_newest_first(&mut posts, |d| d.post.id);
        posts
    }

    fn check_post_refs(&self, post: &Post) -> RepoResult<()> {
        if !self.users.contains_key(&post.author_id) {
            return Err(fk_violation("posts.author_id"));
        }
        if let Some(group_id) = post.group_id {
            if !self.groups.contains_key(&group_id) {
                return Err(fk_violation("posts.group_id"));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).map(|r| r.user.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|r| r.user.username == username)
            .map(|r| r.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|r| r.user.email.eq_ignore_ascii_case(email))
            .map(|r| r.user.clone()))
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(UserRepository::find_by_username(self, username).await?.is_some())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(UserRepository::find_by_email(self, email).await?.is_some())
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.write().await;
        if state.users.values().any(|r| r.user.username == user.username) {
            return Err(DomainError::UsernameAlreadyExists);
        }
        if state
            .users
            .values()
            .any(|r| r.user.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(DomainError::EmailAlreadyExists);
        }
        state.users.insert(
            user.id,
            UserRow {
                user: user.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        if self.state.write().await.delete(EntityKind::User, id) {
            Ok(())
        } else {
            Err(DomainError::UserNotFound(id.to_string()))
        }
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self
            .state
            .read()
            .await
            .users
            .get(&id)
            .map(|r| r.password_hash.clone()))
    }

    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.write().await;
        let row = state
            .users
            .get_mut(&id)
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;
        row.password_hash = password_hash.to_string();
        row.user.updated_at = chrono::Utc::now();
        Ok(())
    }
}

// ============================================================================
// Groups
// ============================================================================

#[async_trait]
impl GroupRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Group>> {
        Ok(self.state.read().await.groups.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Group>> {
        let state = self.state.read().await;
        Ok(state.groups.values().find(|g| g.slug == slug).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<Group>> {
        let mut groups: Vec<Group> = self.state.read().await.groups.values().cloned().collect();
        groups.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(groups)
    }

    async fn create(&self, group: &Group) -> RepoResult<()> {
        let mut state = self.state.write().await;
        if state.groups.values().any(|g| g.slug == group.slug) {
            return Err(DomainError::GroupSlugExists(group.slug.clone()));
        }
        state.groups.insert(group.id, group.clone());
        Ok(())
    }

    async fn update(&self, group: &Group) -> RepoResult<()> {
        let mut state = self.state.write().await;
        if state
            .groups
            .values()
            .any(|g| g.slug == group.slug && g.id != group.id)
        {
            return Err(DomainError::GroupSlugExists(group.slug.clone()));
        }
        let existing = state
            .groups
            .get_mut(&group.id)
            .ok_or_else(|| DomainError::GroupNotFound(group.slug.clone()))?;
        *existing = group.clone();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        if self.state.write().await.delete(EntityKind::Group, id) {
            Ok(())
        } else {
            Err(DomainError::GroupNotFound(id.to_string()))
        }
    }
}

// ============================================================================
// Posts
// ============================================================================

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<PostDetails>> {
        let state = self.state.read().await;
        Ok(state.posts.get(&id).and_then(|p| state.details(p)))
    }

    async fn count(&self, query: &FeedQuery) -> RepoResult<u64> {
        Ok(self.state.read().await.feed(query).len() as u64)
    }

    async fn find_page(
        &self,
        query: &FeedQuery,
        offset: u64,
        limit: u64,
    ) -> RepoResult<Vec<PostDetails>> {
        Ok(self
            .state
            .read()
            .await
            .feed(query)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn create(&self, post: &Post) -> RepoResult<()> {
        let mut state = self.state.write().await;
        state.check_post_refs(post)?;
        state.posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn update(&self, post: &Post) -> RepoResult<()> {
        let mut state = self.state.write().await;
        state.check_post_refs(post)?;
        let existing = state
            .posts
            .get_mut(&post.id)
            .ok_or(DomainError::PostNotFound(post.id))?;
        existing.text.clone_from(&post.text);
        existing.group_id = post.group_id;
        existing.image.clone_from(&post.image);
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        if self.state.write().await.delete(EntityKind::Post, id) {
            Ok(())
        } else {
            Err(DomainError::PostNotFound(id))
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<CommentWithAuthor>> {
        let state = self.state.read().await;
        let mut comments: Vec<CommentWithAuthor> = state
            .comments
            .values()
            .filter(|c| c.post_id == Some(post_id))
            .filter_map(|c| {
                let author = state.users.get(&c.author_id)?.user.clone();
                Some(CommentWithAuthor {
                    comment: c.clone(),
                    author,
                })
            })
            .collect();
        comments.sort_by(|a, b| {
            a.comment
                .created_at
                .cmp(&b.comment.created_at)
                .then(a.comment.id.cmp(&b.comment.id))
        });
        Ok(comments)
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&comment.author_id) {
            return Err(fk_violation("comments.author_id"));
        }
        if let Some(post_id) = comment.post_id {
            if !state.posts.contains_key(&post_id) {
                return Err(fk_violation("comments.post_id"));
            }
        }
        state.comments.insert(comment.id, comment.clone());
        Ok(())
    }
}

// ============================================================================
// Follows
// ============================================================================

#[async_trait]
impl FollowRepository for MemoryStore {
    async fn exists(&self, user_id: Snowflake, author_id: Snowflake) -> RepoResult<bool> {
        Ok(self.state.read().await.follows(user_id, author_id))
    }

    async fn create(&self, follow: &Follow) -> RepoResult<bool> {
        if follow.is_self_follow() {
            return Err(DomainError::ValidationError("cannot follow yourself".to_string()));
        }
        let mut state = self.state.write().await;
        if !state.users.contains_key(&follow.user_id) || !state.users.contains_key(&follow.author_id) {
            return Err(DomainError::UserNotFound("follow target".to_string()));
        }
        if state.follows(follow.user_id, follow.author_id) {
            return Ok(false);
        }
        state.follows.insert(follow.id, *follow);
        Ok(true)
    }

    async fn delete(&self, user_id: Snowflake, author_id: Snowflake) -> RepoResult<u64> {
        let mut state = self.state.write().await;
        let before = state.follows.len();
        state
            .follows
            .retain(|_, f| !(f.user_id == user_id && f.author_id == author_id));
        Ok((before - state.follows.len()) as u64)
    }

    async fn following(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let state = self.state.read().await;
        Ok(state
            .follows
            .values()
            .filter(|f| f.user_id == user_id)
            .map(|f| f.author_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn id(n: i64) -> Snowflake {
        Snowflake::new(n)
    }

    async fn store_with_users(n: i64) -> MemoryStore {
        let store = MemoryStore::new();
        for i in 1..=n {
            let user = User::new(id(i), format!("user{i}"), format!("user{i}@example.com"));
            UserRepository::create(&store, &user, "hash").await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_user_uniqueness() {
        let store = store_with_users(1).await;

        let same_name = User::new(id(2), "user1".into(), "other@example.com".into());
        assert!(matches!(
            UserRepository::create(&store, &same_name, "h").await,
            Err(DomainError::UsernameAlreadyExists)
        ));

        let same_email = User::new(id(3), "other".into(), "USER1@example.com".into());
        assert!(matches!(
            UserRepository::create(&store, &same_email, "h").await,
            Err(DomainError::EmailAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_feed_order_and_paging() {
        let store = store_with_users(1).await;
        let base = Utc::now();
        for i in 0..5 {
            let mut post = Post::new(id(100 + i), id(1), format!("post {i}"), None);
            post.created_at = base + Duration::seconds(i);
            PostRepository::create(&store, &post).await.unwrap();
        }

        assert_eq!(store.count(&FeedQuery::All).await.unwrap(), 5);
        let page = store.find_page(&FeedQuery::All, 1, 2).await.unwrap();
        let texts: Vec<_> = page.iter().map(|d| d.post.text.as_str()).collect();
        assert_eq!(texts, vec!["post 3", "post 2"]);
    }

    #[tokio::test]
    async fn test_follow_edge_is_unique() {
        let store = store_with_users(2).await;

        assert!(FollowRepository::create(&store, &Follow::new(id(10), id(1), id(2))).await.unwrap());
        assert!(!FollowRepository::create(&store, &Follow::new(id(11), id(1), id(2))).await.unwrap());
        assert_eq!(store.following(id(1)).await.unwrap(), vec![id(2)]);

        assert_eq!(FollowRepository::delete(&store, id(1), id(2)).await.unwrap(), 1);
        assert_eq!(FollowRepository::delete(&store, id(1), id(2)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_self_follow_rejected() {
        let store = store_with_users(1).await;
        assert!(FollowRepository::create(&store, &Follow::new(id(10), id(1), id(1)))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_follow_feed_sees_followed_authors_only() {
        let store = store_with_users(3).await;
        FollowRepository::create(&store, &Follow::new(id(10), id(1), id(2)))
            .await
            .unwrap();
        PostRepository::create(&store, &Post::new(id(20), id(2), "from two".into(), None))
            .await
            .unwrap();
        PostRepository::create(&store, &Post::new(id(21), id(3), "from three".into(), None))
            .await
            .unwrap();

        let feed = store.find_page(&FeedQuery::FollowedBy(id(1)), 0, 10).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].author.username, "user2");
        assert_eq!(store.count(&FeedQuery::FollowedBy(id(3))).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_post_with_unknown_author_rejected() {
        let store = MemoryStore::new();
        let post = Post::new(id(1), id(99), "orphan".into(), None);
        assert!(PostRepository::create(&store, &post).await.is_err());
    }
}
