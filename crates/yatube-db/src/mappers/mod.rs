//! Model to entity mappers
//!
//! Joined rows carry the author (and group) columns under prefixed names;
//! the mappers split them back into the domain structs.

mod comment;
mod group;
mod post;
mod user;
