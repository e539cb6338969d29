//! Value objects - immutable types that represent domain concepts

mod slug;
mod snowflake;

pub use slug::{Slug, SlugError};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
