//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod group;
mod post;
mod user;

pub use comment::CommentRow;
pub use group::GroupModel;
pub use post::PostRow;
pub use user::UserModel;
