use std::path::PathBuf;

use crate::models::Id;

/// Errors surfaced by the repositories and the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: Id },

    #[error("{0}")]
    Validation(String),

    #[error("Database read error ({path}): {reason}")]
    StorageRead { path: PathBuf, reason: String },

    #[error("Database write error ({path}): {reason}")]
    StorageWrite { path: PathBuf, reason: String },
}

impl StoreError {
    pub fn project_not_found(id: Id) -> Self {
        Self::NotFound {
            entity: "Project",
            id,
        }
    }

    pub fn task_not_found(id: Id) -> Self {
        Self::NotFound { entity: "Task", id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for failures of the underlying storage rather than of the request.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageRead { .. } | Self::StorageWrite { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
