//! Route handlers
//!
//! Thin adapters: extract the actor and inputs, call one service, shape the
//! response.

pub mod auth;
pub mod cache;
pub mod feeds;
pub mod health;
pub mod media;
pub mod posts;
pub mod users;
