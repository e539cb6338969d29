//! Referential-integrity rules
//!
//! One table lists every foreign key and what happens to the referencing
//! rows when the referenced row is deleted. The SQL schema declares the same
//! rules; the in-memory store applies them in code.

use std::fmt;

/// Kinds of stored rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Group,
    Post,
    Comment,
    Follow,
}

impl EntityKind {
    /// Table name in the relational schema
    pub const fn table(&self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Group => "groups",
            Self::Post => "posts",
            Self::Comment => "comments",
            Self::Follow => "follows",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Action applied to referencing rows on delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    /// Delete the referencing row too
    Cascade,
    /// Clear the reference, keep the row
    SetNull,
}

impl OnDelete {
    pub const fn sql(&self) -> &'static str {
        match self {
            Self::Cascade => "ON DELETE CASCADE",
            Self::SetNull => "ON DELETE SET NULL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub from: EntityKind,
    pub column: &'static str,
    pub to: EntityKind,
    pub on_delete: OnDelete,
}

pub const FOREIGN_KEYS: &[ForeignKey] = &[
    ForeignKey {
        from: EntityKind::Post,
        column: "author_id",
        to: EntityKind::User,
        on_delete: OnDelete::Cascade,
    },
    ForeignKey {
        from: EntityKind::Post,
        column: "group_id",
        to: EntityKind::Group,
        on_delete: OnDelete::SetNull,
    },
    ForeignKey {
        from: EntityKind::Comment,
        column: "post_id",
        to: EntityKind::Post,
        on_delete: OnDelete::Cascade,
    },
    ForeignKey {
        from: EntityKind::Comment,
        column: "author_id",
        to: EntityKind::User,
        on_delete: OnDelete::Cascade,
    },
    ForeignKey {
        from: EntityKind::Follow,
        column: "user_id",
        to: EntityKind::User,
        on_delete: OnDelete::Cascade,
    },
    ForeignKey {
        from: EntityKind::Follow,
        column: "author_id",
        to: EntityKind::User,
        on_delete: OnDelete::Cascade,
    },
];

/// Foreign keys that point at `kind`
pub fn dependents(kind: EntityKind) -> impl Iterator<Item = &'static ForeignKey> {
    FOREIGN_KEYS.iter().filter(move |fk| fk.to == kind)
}

/// The rule for one column, if it is a foreign key
pub fn rule_for(from: EntityKind, column: &str) -> Option<&'static ForeignKey> {
    FOREIGN_KEYS
        .iter()
        .find(|fk| fk.from == from && fk.column == column)
}

impl ForeignKey {
    /// `REFERENCES <table>(id) ON DELETE ...` as it appears in the schema
    pub fn references_clause(&self) -> String {
        format!("REFERENCES {}(id) {}", self.to.table(), self.on_delete.sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deletion_cascades_everywhere() {
        let deps: Vec<_> = dependents(EntityKind::User).collect();
        assert_eq!(deps.len(), 4);
        assert!(deps.iter().all(|fk| fk.on_delete == OnDelete::Cascade));
    }

    #[test]
    fn test_group_deletion_detaches_posts() {
        let deps: Vec<_> = dependents(EntityKind::Group).collect();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].from, EntityKind::Post);
        assert_eq!(deps[0].on_delete, OnDelete::SetNull);
    }

    #[test]
    fn test_rule_lookup() {
        let fk = rule_for(EntityKind::Comment, "post_id").unwrap();
        assert_eq!(fk.references_clause(), "REFERENCES posts(id) ON DELETE CASCADE");
        assert!(rule_for(EntityKind::Comment, "text").is_none());
        assert!(dependents(EntityKind::Comment).next().is_none());
    }
}
