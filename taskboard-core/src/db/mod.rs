//! Database access.
//!
//! [`Database`] is a cheaply cloneable handle over a [`DocumentStore`]. Every
//! operation loads the document, works on it in memory and, for mutations,
//! saves it back, all while holding a single process-wide lock so requests
//! never interleave their read-modify-write cycles.

mod ids;
mod patch;
mod projects;
mod store;
mod tasks;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub use ids::{next_id, Identified};
pub use store::{DocumentStore, JsonFileStore, MemoryStore};

use crate::error::{Result, StoreError};
use crate::models::Document;

/// File name of the document inside the data directory.
pub const DEFAULT_FILE_NAME: &str = "db.json";

#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
    lock: Arc<Mutex<()>>,
}

impl Database {
    /// Open a JSON file database. The file is not touched until first use.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_store(JsonFileStore::new(path))
    }

    /// Open the database in the platform data directory.
    pub fn open_default() -> Result<Self> {
        let path = default_path().ok_or_else(|| StoreError::StorageRead {
            path: PathBuf::from(DEFAULT_FILE_NAME),
            reason: "could not determine data directory".into(),
        })?;
        Ok(Self::open(path))
    }

    pub fn open_memory() -> Self {
        Self::with_store(MemoryStore::default())
    }

    pub fn with_store(store: impl DocumentStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Create an empty document if the store has none.
    pub fn initialize(&self) -> Result<bool> {
        let _guard = self.lock();
        self.store.initialize()
    }

    /// Overwrite whatever is stored with an empty document.
    pub fn reset(&self) -> Result<()> {
        let _guard = self.lock();
        self.store.save(&Document::default())
    }

    /// Snapshot of the full document.
    pub fn document(&self) -> Result<Document> {
        self.read(|document| Ok(document.clone()))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        // The guarded data is (); a poisoned lock only means a previous
        // holder panicked, and the document on disk is still authoritative.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read<T>(&self, op: impl FnOnce(&Document) -> Result<T>) -> Result<T> {
        let _guard = self.lock();
        let document = self.store.load()?;
        op(&document)
    }

    /// Load, apply `op`, save. Nothing is saved when `op` fails.
    fn write<T>(&self, op: impl FnOnce(&mut Document) -> Result<T>) -> Result<T> {
        let _guard = self.lock();
        let mut document = self.store.load()?;
        let output = op(&mut document)?;
        self.store.save(&document)?;
        Ok(output)
    }
}

/// `<data dir>/taskboard/db.json`, if the platform has a data directory.
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "taskboard")
        .map(|dirs| dirs.data_dir().join(DEFAULT_FILE_NAME))
}
