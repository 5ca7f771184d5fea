//! Durable key-value storage backends.
//!
//! The session only ever stores short strings under a handful of keys, so a
//! backend is a flat string map. [`FileStorage`] keeps it as a JSON object on
//! disk; [`MemoryStorage`] keeps it in process.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use crate::error::{Error, Result};

/// Durable string storage keyed by name.
pub trait KeyValueStorage: Send + Sync {
    /// Read a value. Missing keys yield `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Drop every key, discarding whatever is stored.
    fn clear(&self) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// FileStorage
// ─────────────────────────────────────────────────────────────────────────────

/// File-backed storage holding a JSON object of strings.
///
/// Every call reads the file, so two processes sharing the file see each
/// other's writes on their next access. The lock only serializes writers
/// within this process.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Create storage backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| self.io(source))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| Error::Corrupt {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn store(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, json).map_err(|source| self.io(source))
    }

    fn io(&self, source: std::io::Error) -> Error {
        Error::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        self.store(&map)?;
        debug!(key, path = %self.path.display(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.store(&map)?;
            debug!(key, path = %self.path.display(), "removed value");
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.store(&BTreeMap::new())?;
        debug!(path = %self.path.display(), "cleared storage");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MemoryStorage
// ─────────────────────────────────────────────────────────────────────────────

/// In-process storage; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.lock().contains_key(key)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.values.lock().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get("token").unwrap(), None);
        storage.set("token", "abc").unwrap();
        storage.set("role", "admin").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("abc"));
        assert_eq!(reopened.get("role").unwrap().as_deref(), Some("admin"));

        reopened.remove("token").unwrap();
        assert_eq!(storage.get("token").unwrap(), None);
        assert_eq!(storage.get("role").unwrap().as_deref(), Some("admin"));
    }

    #[test]
    fn test_file_storage_remove_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("session.json"));
        storage.remove("token").unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_file_storage_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(storage.get("token"), Err(Error::Corrupt { .. })));

        storage.clear().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");
        assert_eq!(storage.get("token").unwrap(), None);
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::with_entries([("token", "abc")]);
        assert!(storage.contains("token"));
        storage.set("token", "def").unwrap();
        assert_eq!(storage.get("token").unwrap().as_deref(), Some("def"));
        storage.remove("token").unwrap();
        assert!(!storage.contains("token"));
    }
}
