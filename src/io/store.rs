use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tempfile::NamedTempFile;

/// Error type for key-value store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("could not encode value for key {key}: {source}")]
    Json {
        key: String,
        source: serde_json::Error,
    },
}

/// A synchronous string-keyed store of JSON values.
pub trait KeyValueStore {
    /// Read the raw value under `key`. `Ok(None)` when nothing usable is stored.
    fn get_raw(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the value under `key`.
    fn set_raw(&mut self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Preserve what is currently stored under `key` before it is discarded.
    /// An error means the value could not be kept and must not be replaced.
    fn back_up(&self, key: &str) -> Result<(), StoreError>;
}

/// Read `key` as `T`, falling back to `default` when the key is missing or
/// holds a value of the wrong shape. A wrong-shaped value is backed up first;
/// if that fails the load fails instead of falling back.
pub fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    default: T,
) -> Result<T, StoreError> {
    let Some(value) = store.get_raw(key)? else {
        return Ok(default);
    };
    match serde_json::from_value(value) {
        Ok(v) => Ok(v),
        Err(e) => {
            store.back_up(key)?;
            warn!("event=store_load status=fallback key={} error={}", key, e);
            Ok(default)
        }
    }
}

/// Serialize `value` and write it under `key`, replacing what was there.
pub fn save<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_value(value).map_err(|e| StoreError::Json {
        key: key.to_string(),
        source: e,
    })?;
    store.set_raw(key, json)
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// One pretty-printed `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir).map_err(|e| StoreError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        Ok(JsonFileStore {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Path `key` is copied to before its contents are discarded
    pub fn backup_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json.bak", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_raw(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.key_path(key);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io { path, source: e }),
        };
        match serde_json::from_str(&content) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                // Corrupted: keep a copy and start fresh
                self.back_up(key)?;
                warn!("event=store_read status=corrupt key={} error={}", key, e);
                Ok(None)
            }
        }
    }

    fn back_up(&self, key: &str) -> Result<(), StoreError> {
        let bak = self.backup_path(key);
        fs::copy(self.key_path(key), &bak).map_err(|e| StoreError::Io {
            path: bak.clone(),
            source: e,
        })?;
        info!("event=store_backup key={} backup={}", key, bak.display());
        Ok(())
    }

    fn set_raw(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let path = self.key_path(key);
        let content = serde_json::to_string_pretty(&value).map_err(|e| StoreError::Json {
            key: key.to_string(),
            source: e,
        })?;
        atomic_write(&path, content.as_bytes()).map_err(|e| StoreError::Io { path, source: e })
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// HashMap-backed store. Counts writes so callers can observe write-through.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
    writes: usize,
    backups: RefCell<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting it as a write
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// The value that was stored under `key` when it was last backed up
    pub fn backup(&self, key: &str) -> Option<Value> {
        self.backups.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set_raw(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }

    fn back_up(&self, key: &str) -> Result<(), StoreError> {
        if let Some(value) = self.values.get(key) {
            self.backups
                .borrow_mut()
                .insert(key.to_string(), value.clone());
        }
        Ok(())
    }
}
