//! Typed storage handle with automatic serialization.

use crate::backend::{FileStorage, KeyValueStore, MemoryStorage};
use crate::event::{ContextId, Subscription};
use crate::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::sync::Arc;

/// One context's view of a shared key-value store.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Handles created with
/// [`Storage::new_context`] share the backend but carry their own
/// [`ContextId`], so each sees the others' writes as notifications.
///
/// # Example
///
/// ```rust
/// use foodie_storage::Storage;
///
/// let tab_a = Storage::in_memory();
/// let tab_b = tab_a.new_context();
/// let mut events = tab_b.subscribe();
///
/// tab_a.set("greeting", &"hello").unwrap();
///
/// let greeting: Option<String> = tab_b.get("greeting").unwrap();
/// assert_eq!(greeting.as_deref(), Some("hello"));
/// assert_eq!(events.try_next().unwrap().key, "greeting");
/// ```
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
    context: ContextId,
}

impl Storage {
    /// Wrap a backend in a handle for a fresh context.
    pub fn with_backend(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            context: ContextId::generate(),
        }
    }

    /// Open a handle on a new, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryStorage::new()))
    }

    /// Open a handle on a directory-backed store.
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        Ok(Self::with_backend(Arc::new(FileStorage::open(dir)?)))
    }

    /// Another handle on the same backend, acting as a separate context.
    pub fn new_context(&self) -> Self {
        Self::with_backend(Arc::clone(&self.backend))
    }

    /// The context this handle writes as.
    pub fn context(&self) -> ContextId {
        self.context
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist and an error if the stored
    /// value does not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Get the undecoded value.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.backend.get_raw(key)
    }

    /// Set a value in the store.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_raw(key, &raw, self.context)
    }

    /// Set the undecoded value.
    pub fn set_raw(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        self.backend.set_raw(key, raw, self.context)
    }

    /// Delete a value from the store.
    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.backend.delete(key, self.context)
    }

    /// Check if a key exists in the store.
    pub fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.backend.get_raw(key)?.is_some())
    }

    /// Get all keys in the store.
    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.backend.keys()
    }

    /// Subscribe to writes made by other contexts.
    pub fn subscribe(&self) -> Subscription {
        Subscription::new(self.backend.subscribe(), self.context)
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        veg_only: bool,
    }

    #[test]
    fn test_typed_roundtrip() {
        let storage = Storage::in_memory();
        storage.set("prefs", &Prefs { veg_only: true }).unwrap();

        let prefs: Option<Prefs> = storage.get("prefs").unwrap();
        assert_eq!(prefs, Some(Prefs { veg_only: true }));
        assert!(storage.exists("prefs").unwrap());
    }

    #[test]
    fn test_get_missing_key() {
        let storage = Storage::in_memory();
        let prefs: Option<Prefs> = storage.get("prefs").unwrap();
        assert!(prefs.is_none());
        assert!(!storage.exists("prefs").unwrap());
    }

    #[test]
    fn test_get_undecodable_value() {
        let storage = Storage::in_memory();
        storage.set_raw("prefs", "not json").unwrap();

        let result: Result<Option<Prefs>, _> = storage.get("prefs");
        assert!(matches!(result, Err(StorageError::Serialize(_))));
    }

    #[test]
    fn test_contexts_share_backend() {
        let a = Storage::in_memory();
        let b = a.new_context();
        assert_ne!(a.context(), b.context());

        a.set("prefs", &Prefs { veg_only: false }).unwrap();
        let seen: Option<Prefs> = b.get("prefs").unwrap();
        assert_eq!(seen, Some(Prefs { veg_only: false }));
    }

    #[test]
    fn test_writer_does_not_see_own_notification() {
        let a = Storage::in_memory();
        let b = a.new_context();
        let mut a_events = a.subscribe();
        let mut b_events = b.subscribe();

        a.set("prefs", &Prefs { veg_only: true }).unwrap();

        assert!(a_events.try_next().is_none());
        let event = b_events.try_next().unwrap();
        assert_eq!(event.origin, a.context());
        assert_eq!(event.new_value.as_deref(), Some(r#"{"veg_only":true}"#));
    }

    #[test]
    fn test_delete_notifies_with_no_value() {
        let a = Storage::in_memory();
        let b = a.new_context();
        let mut events = b.subscribe();

        a.set_raw("prefs", "{}").unwrap();
        a.delete("prefs").unwrap();

        let drained = events.drain_key("prefs");
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1].new_value, None);
    }
}
