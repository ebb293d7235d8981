//! Token storage.
//!
//! A [`StorageArea`] is a string key/value area, the Rust counterpart of a
//! browser's session or local storage. [`SessionStore`] binds one area and
//! one key and is the only place the session token is read or written.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::shared::config::{AppConfig, StorageKind};
use crate::shared::error::StorageError;

/// A string key/value storage area.
pub trait StorageArea: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every key in the area
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-process storage that ends with the process.
#[derive(Debug)]
pub struct MemoryStorage {
    name: &'static str,
    entries: Mutex<HashMap<String, String>>,
    enabled: bool,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::named("session")
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            entries: Mutex::new(HashMap::new()),
            enabled: true,
        }
    }

    /// An area that refuses every operation, like storage disabled by the
    /// user agent.
    pub fn disabled(name: &'static str) -> Self {
        Self {
            enabled: false,
            ..Self::named(name)
        }
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        if !self.enabled {
            return Err(StorageError::unavailable(self.name, "storage is disabled"));
        }
        self.entries
            .lock()
            .map_err(|_| StorageError::unavailable(self.name, "lock poisoned"))
    }
}

impl StorageArea for MemoryStorage {
    fn name(&self) -> &'static str {
        self.name
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.entries()?.clear();
        Ok(())
    }
}

/// Storage that survives restarts: a JSON object in a single file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub(crate) const NAME: &'static str = "persistent";

    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `<data dir>/lifebridge/storage.json`
    pub fn default_location() -> Result<Self, StorageError> {
        let dir = dirs::data_dir()
            .ok_or_else(|| StorageError::unavailable(Self::NAME, "no user data directory"))?;
        Ok(Self::open(dir.join("lifebridge").join("storage.json")))
    }

    /// `config.storage_path`, or [`FileStorage::default_location`].
    pub fn from_config(config: &AppConfig) -> Result<Self, StorageError> {
        match &config.storage_path {
            Some(path) => Ok(Self::open(path)),
            None => Self::default_location(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, StorageError> {
        self.lock
            .lock()
            .map_err(|_| StorageError::unavailable(Self::NAME, "lock poisoned"))
    }

    fn read(&self) -> Result<HashMap<String, String>, StorageError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StorageError::serialization(Self::NAME, e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StorageError::io(Self::NAME, e)),
        }
    }

    fn write(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::io(Self::NAME, e))?;
        }
        let bytes =
            serde_json::to_vec(entries).map_err(|e| StorageError::serialization(Self::NAME, e))?;
        std::fs::write(&self.path, bytes).map_err(|e| StorageError::io(Self::NAME, e))
    }
}

impl StorageArea for FileStorage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.guard()?;
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.guard()?;
        let mut entries = self.read()?;
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.guard()?;
        let mut entries = self.read()?;
        if entries.remove(key).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.guard()?;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(Self::NAME, e)),
        }
    }
}

/// The session token under one key in one storage area.
#[derive(Clone)]
pub struct SessionStore {
    area: Arc<dyn StorageArea>,
    key: String,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("area", &self.area.name())
            .field("key", &self.key)
            .finish()
    }
}

impl SessionStore {
    pub fn new(area: Arc<dyn StorageArea>, key: impl Into<String>) -> Self {
        Self {
            area,
            key: key.into(),
        }
    }

    /// Session-scoped in-memory store under the default key.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), crate::shared::config::DEFAULT_TOKEN_KEY)
    }

    /// Open the storage area selected by `config.storage`.
    pub fn from_config(config: &AppConfig) -> Result<Self, StorageError> {
        let area: Arc<dyn StorageArea> = match config.storage {
            StorageKind::Session => Arc::new(MemoryStorage::new()),
            StorageKind::Persistent => Arc::new(FileStorage::from_config(config)?),
        };
        Ok(Self::new(area, config.token_key.clone()))
    }

    pub fn area(&self) -> Arc<dyn StorageArea> {
        Arc::clone(&self.area)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored token. An unreadable area reads as no token.
    pub fn token(&self) -> Option<String> {
        match self.area.get(&self.key) {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read session token: {}", e);
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.area.set(&self.key, token)
    }

    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.area.remove(&self.key)
    }
}
