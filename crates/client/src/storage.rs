//! File-backed cart storage.
//!
//! A small key/value store persisted as a single JSON object of string
//! values, in the spirit of the browser's local storage. Writes go to a
//! sibling temporary file which is then renamed over the original, so a crash
//! mid-write leaves the previous contents intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use capebiz_core::{CartStorage, StorageError};
use tracing::debug;

/// Key/value storage in a JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage at `path`. The file and its parent directories are created on
    /// first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CartStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write_entries(&entries)?;
        debug!(path = %self.path.display(), key, bytes = value.len(), "Storage entry written");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use capebiz_core::{CART_STORAGE_KEY, CartStore, ItemKind};
    use rust_decimal::Decimal;

    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("capebiz-storage-{}", uuid::Uuid::new_v4()))
            .join("storage.json")
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let storage = FileStorage::new(temp_path());
        assert!(storage.get_item(CART_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_set_item_creates_file_and_keeps_other_keys() {
        let path = temp_path();
        let mut storage = FileStorage::new(&path);

        storage.set_item("theme", "dark").unwrap();
        storage.set_item(CART_STORAGE_KEY, "[]").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.path(), path.as_path());
        assert_eq!(reopened.get_item("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(
            reopened.get_item(CART_STORAGE_KEY).unwrap().as_deref(),
            Some("[]")
        );

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ nope").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get_item(CART_STORAGE_KEY),
            Err(StorageError::Serialization(_))
        ));

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_cart_survives_reload() {
        let path = temp_path();

        let mut store = CartStore::load(FileStorage::new(&path)).unwrap();
        store
            .add_item("b1", ItemKind::Boost, "Boost A", Decimal::from(99), None)
            .unwrap();
        store
            .add_item(
                "s1",
                ItemKind::Subscription,
                "Starter Subscription",
                Decimal::from(199),
                Some("30 days".to_string()),
            )
            .unwrap();
        store
            .add_item("b1", ItemKind::Boost, "Boost A", Decimal::from(99), None)
            .unwrap();
        let before = store.items().to_vec();
        drop(store);

        let reloaded = CartStore::load(FileStorage::new(&path)).unwrap();
        assert_eq!(reloaded.items(), before.as_slice());
        assert_eq!(reloaded.total(), Decimal::from(397));

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
