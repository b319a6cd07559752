//! Key-value persistence for preferences.

use std::{
    collections::HashMap,
    fs::{create_dir_all, read_to_string, rename, write},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use {
    parking_lot::Mutex,
    serde_json::{from_str, to_string_pretty},
    tracing::{debug, warn},
};

use crate::error::StorageError;

/// A string-to-string key-value store that survives restarts.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage. Nothing outlives the value itself.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build storage pre-populated with a single entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .lock()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a flat JSON object on disk.
///
/// The whole file is rewritten on every `set` by writing a sibling
/// `.tmp` file and renaming it over the target. A missing file reads as
/// empty. A malformed file is an error for `get` and is replaced by `set`.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileStorage {
    /// Storage at the default location, `<config dir>/clipman/preferences.json`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NoConfigDir` when the platform has no config
    /// directory.
    pub fn new() -> Result<Self, StorageError> {
        let dir = dirs::config_dir().ok_or(StorageError::NoConfigDir)?;
        Ok(Self::at(dir.join("clipman").join("preferences.json")))
    }

    /// Storage at a custom path (for testing).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        match read_to_string(&self.path) {
            Ok(contents) => from_str(&contents).map_err(|source| StorageError::Malformed {
                path: self.path.clone(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock();
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let mut entries = match self.load() {
            Err(e @ StorageError::Malformed { .. }) => {
                warn!("Discarding unreadable preferences: {}", e);
                HashMap::new()
            }
            loaded => loaded?,
        };
        entries.insert(key.to_string(), value.to_string());

        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            create_dir_all(parent).map_err(io_err)?;
        }
        let contents = to_string_pretty(&entries).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        debug!("Writing preferences to {:?}", self.path);
        let tmp = self.tmp_path();
        write(&tmp, contents).map_err(io_err)?;
        rename(&tmp, &self.path).map_err(io_err)
    }
}
