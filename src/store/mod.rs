//! Typed key-value storage over an opaque string-valued backend.
//!
//! The host's persistent storage is an external collaborator, so it sits
//! behind the object-safe [`Storage`] trait; [`MemoryStorage`] is the
//! in-process implementation. [`TypedStore`] layers JSON encoding on top so
//! callers read and write typed values.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

use crate::error::HookError;

/// Raw string key-value storage capability supplied by the host.
pub trait Storage: Send + Sync {
    /// Returns the raw entry for `key`, if present.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores `value` under `key`, replacing any previous entry.
    fn set(&self, key: &str, value: String);
    /// Removes the entry for `key`, if present.
    fn remove(&self, key: &str);
    /// Removes every entry.
    fn clear(&self);
}

/// In-process [`Storage`] implementation.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.lock().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }
}

/// Typed view over a [`Storage`] backend; values are JSON-encoded.
///
/// ## Example
/// ```
/// use hookset::{MemoryStorage, TypedStore};
///
/// let store = TypedStore::new(MemoryStorage::new());
/// store.set_item("count", &42u32).unwrap();
///
/// assert_eq!(store.get_item::<u32>("count").unwrap(), Some(42));
/// assert!(store.has_item("count"));
/// ```
pub struct TypedStore<S> {
    storage: S,
}

impl<S: Storage> TypedStore<S> {
    /// Wraps a storage backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Reads and decodes the entry for `key`.
    ///
    /// Returns `Ok(None)` for a missing key.
    ///
    /// # Errors
    /// [`HookError::Storage`] when the entry exists but is not valid JSON for
    /// `T`.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, HookError> {
        match self.storage.get(key) {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| HookError::Storage {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    /// Encodes and stores `value` under `key`.
    ///
    /// # Errors
    /// [`HookError::Storage`] when `value` cannot be encoded as JSON.
    pub fn set_item<T: Serialize>(&self, key: &str, value: &T) -> Result<(), HookError> {
        let raw = serde_json::to_string(value).map_err(|source| HookError::Storage {
            key: key.to_string(),
            source,
        })?;
        trace!(key, bytes = raw.len(), "store set");
        self.storage.set(key, raw);
        Ok(())
    }

    /// Removes the entry for `key`.
    pub fn remove_item(&self, key: &str) {
        self.storage.remove(key);
    }

    /// Returns true when an entry exists for `key`.
    pub fn has_item(&self, key: &str) -> bool {
        self.storage.get(key).is_some()
    }

    /// Removes every entry from the backend.
    pub fn clear(&self) {
        self.storage.clear();
    }

    /// Returns the underlying backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        admin: bool,
    }

    #[test]
    fn typed_round_trip() {
        let store = TypedStore::new(MemoryStorage::new());
        let profile = Profile {
            name: "ada".to_string(),
            admin: true,
        };

        store.set_item("profile", &profile).expect("set");
        assert_eq!(store.get_item::<Profile>("profile").expect("get"), Some(profile));
    }

    #[test]
    fn missing_key_is_none() {
        let store = TypedStore::new(MemoryStorage::new());
        assert_eq!(store.get_item::<u32>("absent").expect("get"), None);
        assert!(!store.has_item("absent"));
    }

    #[test]
    fn undecodable_entry_is_a_storage_error() {
        let store = TypedStore::new(MemoryStorage::new());
        store.storage().set("broken", "not-json".to_string());

        let err = store.get_item::<u32>("broken").expect_err("must fail");
        assert!(matches!(err, HookError::Storage { ref key, .. } if key == "broken"));
    }

    #[test]
    fn remove_and_clear() {
        let store = TypedStore::new(MemoryStorage::new());
        store.set_item("a", &1u8).expect("set");
        store.set_item("b", &2u8).expect("set");

        store.remove_item("a");
        assert!(!store.has_item("a"));
        assert!(store.has_item("b"));

        store.clear();
        assert!(!store.has_item("b"));
    }
}
