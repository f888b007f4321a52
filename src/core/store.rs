//! Persistence of the single document record
//!
//! [`DocumentStore`] reads and writes one JSON record under [`STORAGE_KEY`]
//! through an injected [`Storage`] capability. Every failure on this path is
//! recoverable: loading falls back to defaults and saving is best-effort.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use super::document::{DocumentModel, PersistedRecord};

/// Key of the persisted document record
pub const STORAGE_KEY: &str = "trabalhos_pdf_v2";

/// Errors raised by a storage backend or while decoding a record
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("stored record is not a JSON object")]
    NotAnObject,
}

/// String key-value storage scoped to the current user
pub trait Storage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Storage backed by one `<key>.json` file per key in a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(io_error(&self.root))?;

        // Write a sibling first so a crash never leaves a truncated record
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(io_error(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_error(&path))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path)(e)),
        }
    }
}

/// In-memory storage, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Loads and saves the one document of this storage scope
#[derive(Debug)]
pub struct DocumentStore<S> {
    storage: S,
    defaults: DocumentModel,
}

impl<S: Storage> DocumentStore<S> {
    /// Create a store that falls back to `defaults`
    pub fn new(storage: S, defaults: DocumentModel) -> Self {
        Self { storage, defaults }
    }

    #[allow(dead_code)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read and decode the persisted record, if any
    pub fn try_load(&self) -> Result<Option<PersistedRecord>, StorageError> {
        let Some(raw) = self.storage.read(STORAGE_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<Value>(&raw)? {
            Value::Null => Ok(None),
            value @ Value::Object(_) => Ok(Some(serde_json::from_value(value)?)),
            _ => Err(StorageError::NotAnObject),
        }
    }

    /// Load the document, falling back to defaults on any failure
    pub fn load(&self) -> DocumentModel {
        match self.try_load() {
            Ok(Some(record)) => {
                tracing::debug!("Loaded document record {}", STORAGE_KEY);
                self.defaults.clone().overlay(record)
            }
            Ok(None) => {
                tracing::info!("No stored document, starting from template");
                self.defaults.clone()
            }
            Err(e) => {
                tracing::warn!("Discarding stored document: {}", e);
                self.defaults.clone()
            }
        }
    }

    /// Overwrite the persisted record with `model`
    pub fn try_save(&mut self, model: &DocumentModel) -> Result<(), StorageError> {
        let content = serde_json::to_string(model)?;
        self.storage.write(STORAGE_KEY, &content)
    }

    /// Best-effort save; returns whether the write succeeded
    pub fn save(&mut self, model: &DocumentModel) -> bool {
        match self.try_save(model) {
            Ok(()) => {
                tracing::debug!("Saved document record {}", STORAGE_KEY);
                true
            }
            Err(e) => {
                tracing::warn!("Failed to save document: {}", e);
                false
            }
        }
    }

    /// Remove the persisted record
    #[allow(dead_code)]
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.storage.remove(STORAGE_KEY)
    }
}
