//! Integration test utilities for Yatube
//!
//! Spawns the HTTP server over in-memory backends and drives it with reqwest.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
