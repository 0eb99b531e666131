//! Document storage backends.
//!
//! [`DocumentStore`] is the storage port the repositories talk to. The
//! production backend is [`JsonFileStore`], which keeps the whole document in
//! one pretty-printed JSON file; [`MemoryStore`] backs tests and ephemeral
//! servers.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Result, StoreError};
use crate::models::Document;

pub trait DocumentStore: Send + Sync {
    /// Read the entire document.
    fn load(&self) -> Result<Document>;

    /// Replace the entire document.
    fn save(&self, document: &Document) -> Result<()>;

    /// Create an empty document if none exists yet. Returns whether one was
    /// created.
    fn initialize(&self) -> Result<bool> {
        Ok(false)
    }
}

/// A document kept in a single JSON file, rewritten wholesale on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, reason: impl ToString) -> StoreError {
        StoreError::StorageRead {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn write_error(&self, reason: impl ToString) -> StoreError {
        StoreError::StorageWrite {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn write_atomically(&self, json: &str) -> std::io::Result<()> {
        // Write to temp file, then rename
        let temp_path = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.path)
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<Document> {
        let json = fs::read_to_string(&self.path).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Error reading database");
            self.read_error(e)
        })?;
        serde_json::from_str(&json).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Malformed database document");
            self.read_error(e)
        })
    }

    fn save(&self, document: &Document) -> Result<()> {
        let json = serde_json::to_string_pretty(document).map_err(|e| self.write_error(e))?;
        self.write_atomically(&json).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Error writing database");
            self.write_error(e)
        })
    }

    fn initialize(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }
        self.save(&Document::default())?;
        tracing::info!(path = %self.path.display(), "Created empty database");
        Ok(true)
    }
}

/// In-process document, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Document>,
}

impl MemoryStore {
    pub fn new(document: Document) -> Self {
        Self {
            document: Mutex::new(document),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<Document> {
        Ok(self
            .document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, document: &Document) -> Result<()> {
        *self
            .document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = document.clone();
        Ok(())
    }
}
