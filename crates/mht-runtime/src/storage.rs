// crates/mht-runtime/src/storage.rs
//! String key-value persistence behind an async interface.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file {path} is not a JSON object of strings: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Asynchronous string store. Reads of a missing key yield `Ok(None)`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> impl Future<Output = StorageResult<Option<String>>> + Send;
    fn set_item(&self, key: &str, value: &str) -> impl Future<Output = StorageResult<()>> + Send;
    fn remove_item(&self, key: &str) -> impl Future<Output = StorageResult<()>> + Send;
}

impl<S: KeyValueStore + Sync> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> impl Future<Output = StorageResult<Option<String>>> + Send {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> impl Future<Output = StorageResult<()>> + Send {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> impl Future<Output = StorageResult<()>> + Send {
        (**self).remove_item(key)
    }
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.snapshot(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object on disk. Every write rewrites the
/// whole file; a missing file reads as empty and a corrupt one is replaced
/// on the next write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StorageResult<BTreeMap<String, String>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> StorageResult<()> {
        let contents = serde_json::to_string_pretty(items).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.path, contents).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!("Wrote {} keys to {}", items.len(), self.path.display());
        Ok(())
    }

    fn update<F>(&self, change: F) -> StorageResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        // A corrupt file is replaced so later writes can succeed.
        let mut items = match self.read_all() {
            Ok(items) => items,
            Err(StorageError::Corrupt { path, source }) => {
                warn!("Replacing unreadable store {}: {}", path.display(), source);
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        change(&mut items);
        self.write_all(&items)
    }
}

impl KeyValueStore for JsonFileStore {
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    async fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.update(|items| {
            items.remove(key);
        })
    }
}
