//! # Key-Value Backends
//!
//! Where settings JSON actually lives.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storage Backends                                   │
//! │                                                                         │
//! │  App startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::file(dir) / in_memory() / disabled()                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::open() ──► Arc<dyn KeyValueStore>                        │
//! │                               │                                         │
//! │          ┌────────────────────┼─────────────────────┐                  │
//! │          ▼                    ▼                     ▼                  │
//! │   ┌─────────────┐     ┌──────────────┐      ┌──────────────┐          │
//! │   │ MemoryStore │     │  FileStore   │      │DisabledStore │          │
//! │   │ HashMap     │     │ <key>.json   │      │ always fails │          │
//! │   │ behind Mutex│     │ tmp + rename │      │ Unavailable  │          │
//! │   └─────────────┘     └──────────────┘      └──────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Backends store opaque strings. Shape checking happens in
//! [`crate::decode`].

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Trait
// =============================================================================

/// A string-keyed store of string values.
///
/// Implementations must be shareable across threads; the settings store is
/// read from command handlers and debounced tasks alike.
pub trait KeyValueStore: Send + Sync {
    /// Reads a value. A missing key is `Ok(None)`, not an error.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes a value. Removing a missing key succeeds.
    fn delete(&self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// Memory Backend
// =============================================================================

/// Ephemeral backend, used by tests and sessions without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Backend
// =============================================================================

/// One `<key>.json` file per key under a data directory.
///
/// Writes go to `<key>.json.tmp` first and are renamed into place, so a
/// reader never observes a half-written file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a file store rooted at `dir`.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// Returns the data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(key, e))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| StoreError::io(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::io(key, e))?;

        debug!(key = %key, path = %path.display(), "Wrote settings file");
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }
}

// =============================================================================
// Disabled Backend
// =============================================================================

/// Backend for contexts without storage. Every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledStore;

impl DisabledStore {
    fn unavailable() -> StoreError {
        StoreError::Unavailable("persistence is disabled".to_string())
    }
}

impl KeyValueStore for DisabledStore {
    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(Self::unavailable())
    }

    fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(Self::unavailable())
    }

    fn delete(&self, _key: &str) -> StoreResult<()> {
        Err(Self::unavailable())
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Which backend to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File(PathBuf),
    Disabled,
}

/// Store configuration.
///
/// ## Example
/// ```rust
/// use kuyum_store::{KeyValueStore, StoreConfig};
///
/// let store = StoreConfig::in_memory().open();
/// store.set("loss-settings", "{}").unwrap();
/// assert_eq!(store.get("loss-settings").unwrap().as_deref(), Some("{}"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

impl StoreConfig {
    /// Persists settings as JSON files under `dir`.
    pub fn file(dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            backend: StoreBackend::File(dir.into()),
        }
    }

    /// Keeps settings in memory for the lifetime of the store (for testing).
    pub fn in_memory() -> Self {
        StoreConfig {
            backend: StoreBackend::Memory,
        }
    }

    /// Disables persistence. Reads yield defaults, writes are dropped.
    pub fn disabled() -> Self {
        StoreConfig {
            backend: StoreBackend::Disabled,
        }
    }

    /// Builds the configured backend.
    pub fn open(&self) -> Arc<dyn KeyValueStore> {
        match &self.backend {
            StoreBackend::Memory => {
                info!("Using in-memory settings store");
                Arc::new(MemoryStore::new())
            }
            StoreBackend::File(dir) => {
                info!(dir = %dir.display(), "Using file settings store");
                Arc::new(FileStore::new(dir.clone()))
            }
            StoreBackend::Disabled => {
                info!("Settings persistence disabled");
                Arc::new(DisabledStore)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
