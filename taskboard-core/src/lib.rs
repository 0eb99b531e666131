//! Core library for Taskboard.
//!
//! This crate provides the domain models, the JSON document store and the
//! project/task repositories, independent of any transport layer.
//!
//! # Usage
//!
//! ```no_run
//! use taskboard_core::db::Database;
//! use taskboard_core::models::*;
//!
//! let db = Database::open_default()?;
//! db.initialize()?;
//!
//! let project = db.create_project(CreateProjectInput {
//!     name: Some("Website".into()),
//!     description: Some("Relaunch".into()),
//! })?;
//! let tasks = db.list_tasks(&TaskFilter { project_id: Some(project.id) })?;
//! # Ok::<(), taskboard_core::StoreError>(())
//! ```

pub mod db;
pub mod error;
pub mod models;

// Re-export commonly used types at crate root
pub use db::Database;
pub use error::{Result, StoreError};
