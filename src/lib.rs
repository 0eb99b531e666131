//! Taskboard: a project/task tracker served over a small REST API.
//!
//! Persistence and domain rules live in `taskboard-core`; this crate adds the
//! HTTP layer and server configuration.

pub mod api;
pub mod config;

pub use taskboard_core::{db, models, Database, StoreError};
