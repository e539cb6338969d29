//! Group entity - a community a post can optionally belong to

use crate::value_objects::{Slug, Snowflake};

/// Maximum title length
pub const MAX_GROUP_TITLE_LEN: usize = 200;

/// Named community/topic; identified publicly by its slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: Snowflake,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl Group {
    /// Create a new Group
    pub fn new(id: Snowflake, title: String, slug: Slug, description: String) -> Self {
        Self {
            id,
            title,
            slug: slug.into(),
            description,
        }
    }

    /// Update the editable fields
    pub fn update(&mut self, title: Option<String>, slug: Option<Slug>, description: Option<String>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(slug) = slug {
            self.slug = slug.into();
        }
        if let Some(description) = description {
            self.description = description;
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}
