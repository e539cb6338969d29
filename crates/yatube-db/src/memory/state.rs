//! Rows and referential rules of the in-memory store

use std::collections::BTreeMap;

use yatube_core::entities::{Comment, Follow, Group, Post, User};
use yatube_core::integrity::{self, EntityKind, ForeignKey, OnDelete};
use yatube_core::value_objects::Snowflake;

pub(super) struct UserRow {
    pub user: User,
    pub password_hash: String,
}

#[derive(Default)]
pub(super) struct State {
    pub users: BTreeMap<Snowflake, UserRow>,
    pub groups: BTreeMap<Snowflake, Group>,
    pub posts: BTreeMap<Snowflake, Post>,
    pub comments: BTreeMap<Snowflake, Comment>,
    pub follows: BTreeMap<Snowflake, Follow>,
}

impl State {
    pub fn follows(&self, user_id: Snowflake, author_id: Snowflake) -> bool {
        self.follows
            .values()
            .any(|f| f.user_id == user_id && f.author_id == author_id)
    }

    /// Rows of `fk.from` whose `fk.column` points at `target`
    fn referencing(&self, fk: &ForeignKey, target: Snowflake) -> Vec<Snowflake> {
        let target = Some(target);
        match (fk.from, fk.column) {
            (EntityKind::Post, "author_id") => collect(&self.posts, |p| Some(p.author_id) == target),
            (EntityKind::Post, "group_id") => collect(&self.posts, |p| p.group_id == target),
            (EntityKind::Comment, "post_id") => collect(&self.comments, |c| c.post_id == target),
            (EntityKind::Comment, "author_id") => {
                collect(&self.comments, |c| Some(c.author_id) == target)
            }
            (EntityKind::Follow, "user_id") => collect(&self.follows, |f| Some(f.user_id) == target),
            (EntityKind::Follow, "author_id") => {
                collect(&self.follows, |f| Some(f.author_id) == target)
            }
            _ => Vec::new(),
        }
    }

    fn set_null(&mut self, fk: &ForeignKey, row: Snowflake) {
        match (fk.from, fk.column) {
            (EntityKind::Post, "group_id") => {
                if let Some(post) = self.posts.get_mut(&row) {
                    post.group_id = None;
                }
            }
            (EntityKind::Comment, "post_id") => {
                if let Some(comment) = self.comments.get_mut(&row) {
                    comment.post_id = None;
                }
            }
            _ => {}
        }
    }

    /// Delete a row and apply every ON DELETE rule that points at it
    ///
    /// Returns `false` if the row did not exist.
    pub fn delete(&mut self, kind: EntityKind, id: Snowflake) -> bool {
        let removed = match kind {
            EntityKind::User => self.users.remove(&id).is_some(),
            EntityKind::Group => self.groups.remove(&id).is_some(),
            EntityKind::Post => self.posts.remove(&id).is_some(),
            EntityKind::Comment => self.comments.remove(&id).is_some(),
            EntityKind::Follow => self.follows.remove(&id).is_some(),
        };
        if !removed {
            return false;
        }

        for fk in integrity::dependents(kind) {
            for row in self.referencing(fk, id) {
                match fk.on_delete {
                    OnDelete::Cascade => {
                        self.delete(fk.from, row);
                    }
                    OnDelete::SetNull => self.set_null(fk, row),
                }
            }
        }
        true
    }
}

fn collect<T, F: Fn(&T) -> bool>(rows: &BTreeMap<Snowflake, T>, pred: F) -> Vec<Snowflake> {
    rows.iter()
        .filter(|(_, row)| pred(row))
        .map(|(id, _)| *id)
        .collect()
}
