//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use yatube_common::TokenPair;
use yatube_core::{CommentWithAuthor, Group, Page, PostDetails, User};

use super::responses::{
    AuthResponse, CommentResponse, CurrentUserResponse, GroupResponse, PageResponse,
    PostResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            full_name: user.full_name(),
        }
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: user.created_at,
        }
    }
}

impl AuthResponse {
    pub fn new(tokens: TokenPair, user: &User) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
            user: CurrentUserResponse::from(user),
        }
    }
}

// ============================================================================
// Group / Post / Comment Mappers
// ============================================================================

impl From<&Group> for GroupResponse {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.to_string(),
            title: group.title.clone(),
            slug: group.slug.clone(),
            description: group.description.clone(),
        }
    }
}

impl From<PostDetails> for PostResponse {
    fn from(details: PostDetails) -> Self {
        let PostDetails {
            post,
            author,
            group,
        } = details;

        Self {
            id: post.id.to_string(),
            text: post.text,
            author: UserResponse::from(&author),
            group: group.as_ref().map(GroupResponse::from),
            image: post.image,
            created_at: post.created_at,
        }
    }
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(value: CommentWithAuthor) -> Self {
        let CommentWithAuthor { comment, author } = value;
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.map(|id| id.to_string()).unwrap_or_default(),
            author: UserResponse::from(&author),
            text: comment.text,
            created_at: comment.created_at,
        }
    }
}

// ============================================================================
// Pagination
// ============================================================================

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        let has_next = page.has_next();
        let has_previous = page.has_previous();
        Self {
            items: page.items,
            number: page.number,
            num_pages: page.num_pages,
            total: page.total,
            per_page: page.per_page,
            has_next,
            has_previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yatube_core::{Paginator, Post, Slug, Snowflake};

    fn author() -> User {
        User::new(Snowflake::new(1), "leo".to_string(), "leo@example.com".to_string())
            .with_name("Leo", "Tolstoy")
    }

    #[test]
    fn test_post_details_to_response() {
        let group = Group::new(
            Snowflake::new(5),
            "Cats".to_string(),
            Slug::parse("cats").unwrap(),
            "All about cats".to_string(),
        );
        let mut post = Post::new(Snowflake::new(9), Snowflake::new(1), "Meow".to_string(), Some(group.id));
        post.set_image(Some("posts/9_cat.png".to_string()));

        let response = PostResponse::from(PostDetails {
            post,
            author: author(),
            group: Some(group),
        });

        assert_eq!(response.id, "9");
        assert_eq!(response.author.full_name, "Leo Tolstoy");
        assert_eq!(response.group.as_ref().map(|g| g.slug.as_str()), Some("cats"));
        assert_eq!(response.image.as_deref(), Some("posts/9_cat.png"));
    }

    #[test]
    fn test_page_flags_carried_over() {
        let window = Paginator::new(10).resolve(19, Some("2"));
        let response = PageResponse::from(window.into_page(vec![1, 2, 3]));

        assert_eq!(response.number, 2);
        assert_eq!(response.num_pages, 2);
        assert!(!response.has_next);
        assert!(response.has_previous);
        assert_eq!(response.items, vec![1, 2, 3]);
    }
}
