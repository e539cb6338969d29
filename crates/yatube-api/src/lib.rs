//! # yatube-api
//!
//! JSON HTTP server for Yatube built on Axum.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, create_app_with_config, create_in_memory_state, run};
pub use state::AppState;
