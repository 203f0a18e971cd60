//! Key/value storage the cart persists through.
//!
//! The cart writes a single string value (a JSON array) under a fixed key on
//! every mutation and reads it back once at startup. Backends only need to
//! get and set strings by key.

use std::collections::HashMap;

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cart could not be encoded, or the backend's own container is corrupt.
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Durable string storage keyed by name.
pub trait CartStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local storage. Contents are lost when the value is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with a single entry.
    #[must_use]
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_owned(), value.to_owned());
        Self { entries }
    }
}

impl CartStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get_item("capebiz_cart").unwrap().is_none());

        storage.set_item("capebiz_cart", "[]").unwrap();
        assert_eq!(
            storage.get_item("capebiz_cart").unwrap().as_deref(),
            Some("[]")
        );

        storage.set_item("capebiz_cart", "[1]").unwrap();
        assert_eq!(
            storage.get_item("capebiz_cart").unwrap().as_deref(),
            Some("[1]")
        );
    }
}
