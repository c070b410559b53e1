//! Key/value preference persistence

use crate::error::PreferenceError;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Minimal string key/value persistence
pub trait PreferenceStore: Send + Sync {
    /// Read a value
    ///
    /// # Errors
    /// Backend-specific read failures.
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Write a value
    ///
    /// # Errors
    /// Backend-specific write failures.
    fn save(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    inner: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.inner.lock().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.inner.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-object file store
///
/// A missing file reads as empty; the file (and its parent directory) is
/// created on first write. Writes go through a temporary sibling and a
/// rename so a crash never leaves a truncated file behind.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FilePreferenceStore {
    /// Create store backed by `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Backing file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(PreferenceError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|source| PreferenceError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        let io_err = |source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(values).map_err(|source| {
            PreferenceError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(io_err)?;
        if let Err(source) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(source));
        }
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let _guard = self.lock.lock();
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let _guard = self.lock.lock();
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)?;
        tracing::debug!("Saved preference {} to {}", key, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.load("k").unwrap(), None);
        store.save("k", "v").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.load("selectedModel").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        FilePreferenceStore::new(&path)
            .save("selectedModel", "mistral")
            .unwrap();

        let reopened = FilePreferenceStore::new(&path);
        assert_eq!(
            reopened.load("selectedModel").unwrap().as_deref(),
            Some("mistral")
        );
    }

    #[test]
    fn file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("prefs.json"));
        store.save("a", "1").unwrap();
        store.save("b", "2").unwrap();
        store.save("a", "3").unwrap();

        assert_eq!(store.load("a").unwrap().as_deref(), Some("3"));
        assert_eq!(store.load("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn file_store_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FilePreferenceStore::new(&path);
        assert!(matches!(
            store.load("a"),
            Err(PreferenceError::Malformed { .. })
        ));
    }

    #[test]
    fn file_store_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), "x").unwrap();

        let store = FilePreferenceStore::new(&path);
        let mut values = BTreeMap::new();
        values.insert("selectedModel".to_string(), "mistral".to_string());

        assert!(matches!(
            store.write_all(&values),
            Err(PreferenceError::Io { .. })
        ));
        assert!(!dir.path().join("prefs.json.tmp").exists());
    }
}
