// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key/value storage backends.
//!
//! - [`FileStorage`]: one JSON file per key in a data directory
//! - [`MemoryStorage`]: shared in-process map (tests, ephemeral sessions)
//! - [`Storage`]: either of the above, picked at startup

use crate::gateways::PersistenceGateway;
use dashmap::DashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Errors from storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Failed to encode snapshot: {0}")]
    Encode(String),
}

/// File-backed storage: `<dir>/<key>.json`.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// reader sees either the old or the new snapshot.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) the storage directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| StorageError::Io(e.to_string()))?;
        tracing::info!(dir = %dir.display(), "Opened workout storage");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl PersistenceGateway for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| StorageError::Io(e.to_string()))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::Io(e.to_string()))?;
        tracing::debug!(key, bytes = value.len(), "Snapshot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}

/// In-memory storage. Clones share the same entries, so a "fresh" store
/// built on a clone sees what the previous one wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl PersistenceGateway for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage backend selected at startup.
#[derive(Debug, Clone)]
pub enum Storage {
    File(FileStorage),
    Memory(MemoryStorage),
}

impl Storage {
    /// Ephemeral storage that lives as long as the process.
    pub fn memory() -> Self {
        Storage::Memory(MemoryStorage::new())
    }
}

impl PersistenceGateway for Storage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Storage::File(s) => s.read(key),
            Storage::Memory(s) => s.read(key),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Storage::File(s) => s.write(key, value),
            Storage::Memory(s) => s.write(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self {
            Storage::File(s) => s.remove(key),
            Storage::Memory(s) => s.remove(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mapty-storage-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_file_storage_read_missing_is_none() {
        let storage = FileStorage::open(temp_dir("missing")).unwrap();
        assert_eq!(storage.read("workouts").unwrap(), None);
    }

    #[test]
    fn test_file_storage_write_read_remove() {
        let dir = temp_dir("cycle");
        let storage = FileStorage::open(&dir).unwrap();

        storage.write("workouts", "[1,2,3]").unwrap();
        assert_eq!(storage.read("workouts").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(dir.join("workouts.json").exists());
        assert!(!dir.join("workouts.json.tmp").exists());

        storage.write("workouts", "[]").unwrap();
        assert_eq!(storage.read("workouts").unwrap().as_deref(), Some("[]"));

        storage.remove("workouts").unwrap();
        assert_eq!(storage.read("workouts").unwrap(), None);

        // Removing an absent key is fine
        storage.remove("workouts").unwrap();
    }

    #[test]
    fn test_file_storage_rejects_path_like_keys() {
        let storage = FileStorage::open(temp_dir("keys")).unwrap();
        assert!(matches!(
            storage.write("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(storage.read(""), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.write("workouts", "[]").unwrap();
        assert_eq!(other.read("workouts").unwrap().as_deref(), Some("[]"));

        other.remove("workouts").unwrap();
        assert!(!storage.contains_key("workouts"));
    }
}
