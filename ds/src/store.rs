//! Core key-value store implementations

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::RECORD_EXTENSION;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid key '{0}': use ASCII letters, digits, '-' or '_'")]
    InvalidKey(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// String-valued key-value store
///
/// Each key holds at most one value; `set` overwrites, so the latest write wins.
pub trait KvStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// List stored keys in sorted order
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// Check that a key is usable as a file stem
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Filesystem-backed store: one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Base path for storage
    base_path: PathBuf,
}

impl FileStore {
    /// Open or create a store at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).map_err(|e| StoreError::io(&base_path, e))?;
        debug!(?base_path, "Opened draft store");
        Ok(Self { base_path })
    }

    /// Directory holding the records
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.{}", key, RECORD_EXTENSION))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!(".{}.{}.tmp", key, RECORD_EXTENSION))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        let path = self.record_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(key, bytes = content.len(), "FileStore::get: hit");
                Ok(Some(content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(key, "FileStore::get: miss");
                Ok(None)
            }
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let temp = self.temp_path(key);
        let path = self.record_path(key);

        // Readers only ever see the previous record or the complete new one
        fs::write(&temp, value).map_err(|e| StoreError::io(&temp, e))?;
        fs::rename(&temp, &path).map_err(|e| StoreError::io(&path, e))?;

        debug!(key, bytes = value.len(), "FileStore::set: stored");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let path = self.record_path(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(key, "Removed record");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();

        let entries = fs::read_dir(&self.base_path).map_err(|e| StoreError::io(&self.base_path, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.base_path, e))?;
            let path = entry.path();
            if path.extension().map(|e| e == RECORD_EXTENSION).unwrap_or(false)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && validate_key(stem).is_ok()
            {
                keys.push(stem.to_string());
            }
        }

        keys.sort();
        Ok(keys)
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.values.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.values.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
