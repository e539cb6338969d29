//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, page selection and path ids.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use pagination::PageParam;
pub use path::IdPath;
pub use validated::ValidatedJson;
