//! Durable key/value storage for the locale preference.

use crate::error::StorageError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Key under which the chosen locale code is stored.
pub const LOCALE_PREFERENCE_KEY: &str = "locale_preference";

/// Minimal durable key/value store.
///
/// `get` treats any read problem as absence. `set` may fail; callers decide
/// whether that matters.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `key = value`.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.values().insert(key.to_string(), value.to_string());
        store
    }

    fn values(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file-backed store with a per-value size bound.
///
/// The whole map is rewritten on every `set`; it only ever holds a handful of
/// small entries.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    max_value_bytes: usize,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, max_value_bytes: usize) -> Self {
        Self {
            path: path.into(),
            max_value_bytes,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match self.read_map() {
            Ok(map) => map.get(key).cloned(),
            Err(e) => {
                debug!("Ignoring unreadable store {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if value.len() > self.max_value_bytes {
            return Err(StorageError::ValueTooLarge {
                key: key.to_string(),
                size: value.len(),
                limit: self.max_value_bytes,
            });
        }

        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        // A corrupt file is replaced rather than blocking every future write.
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_string(), value.to_string());

        let write = || -> Result<(), StorageError> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let contents = serde_json::to_string_pretty(&map)?;
            std::fs::write(&self.path, contents)?;
            Ok(())
        };

        write().map_err(|e| StorageError::WriteFailure {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}
