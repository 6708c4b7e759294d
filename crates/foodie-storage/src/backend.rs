//! Storage backends.

use crate::event::{ContextId, StorageEvent, EVENT_CHANNEL_CAPACITY};
use crate::StorageError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::broadcast;

/// A raw string key-value store shared by every context of one application.
///
/// Backends broadcast a [`StorageEvent`] after each successful write or
/// delete. Events are sent while the write lock is held, so subscribers see
/// them in the same order the writes were applied.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value for `key`.
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the raw value for `key` on behalf of `origin`.
    fn set_raw(&self, key: &str, value: &str, origin: ContextId) -> Result<(), StorageError>;

    /// Delete `key` on behalf of `origin`. Deleting a missing key succeeds.
    fn delete(&self, key: &str, origin: ContextId) -> Result<(), StorageError>;

    /// List all keys.
    fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// Subscribe to change notifications.
    fn subscribe(&self) -> broadcast::Receiver<StorageEvent>;
}

fn notify(
    events: &broadcast::Sender<StorageEvent>,
    key: &str,
    new_value: Option<&str>,
    origin: ContextId,
) {
    // No subscribers is not an error.
    let _ = events.send(StorageEvent {
        key: key.to_string(),
        new_value: new_value.map(str::to_string),
        origin,
    });
}

/// In-memory store, usually shared between contexts through an `Arc`.
#[derive(Debug)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    events: broadcast::Sender<StorageEvent>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            entries: Mutex::new(HashMap::new()),
            events,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str, origin: ContextId) -> Result<(), StorageError> {
        let mut entries = self.lock()?;
        entries.insert(key.to_string(), value.to_string());
        notify(&self.events, key, Some(value), origin);
        Ok(())
    }

    fn delete(&self, key: &str, origin: ContextId) -> Result<(), StorageError> {
        let mut entries = self.lock()?;
        if entries.remove(key).is_some() {
            notify(&self.events, key, None, origin);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys: Vec<String> = self.lock()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.events.subscribe()
    }
}

/// Directory-backed store: one `<key>.json` file per key.
///
/// Writes go to a temporary file that is renamed into place, so readers
/// never observe a half-written value. Notifications reach handles in the
/// same process only.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
    write_lock: Mutex<()>,
    events: broadcast::Sender<StorageEvent>,
}

impl FileStorage {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
            events,
        })
    }

    /// Directory holding the key files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, StorageError> {
        self.write_lock
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))
    }
}

impl KeyValueStore for FileStorage {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_raw(&self, key: &str, value: &str, origin: ContextId) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        let _guard = self.guard()?;
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        notify(&self.events, key, Some(value), origin);
        Ok(())
    }

    fn delete(&self, key: &str, origin: ContextId) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let _guard = self.guard()?;
        match fs::remove_file(&path) {
            Ok(()) => notify(&self.events, key, None, origin),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.events.subscribe()
    }
}
