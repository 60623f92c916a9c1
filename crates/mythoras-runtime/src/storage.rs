#![forbid(unsafe_code)]

//! Key/value storage backends for persisted shell state.
//!
//! Values are opaque strings (JSON in practice). A missing key loads as
//! `None`; only genuine I/O failures surface as [`StorageError`].
//!
//! [`FileStorage`] keeps one `<key>.json` file per key under a directory and
//! writes through a temp file followed by a rename, so a crash mid-write
//! leaves the previous value intact.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

/// Errors from a storage backend.
#[derive(Debug)]
pub enum StorageError {
    /// Keys must be non-empty.
    InvalidKey(String),
    Io { key: String, source: io::Error },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey(key) => write!(f, "invalid storage key {key:?}"),
            Self::Io { key, source } => write!(f, "storage I/O error for {key:?}: {source}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidKey(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A string store addressed by key.
pub trait StorageBackend {
    /// Short name for diagnostics.
    fn name(&self) -> &str;

    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Returns whether a value was removed.
    fn remove(&mut self, key: &str) -> StorageResult<bool>;
}

fn check_key(key: &str) -> StorageResult<()> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey(key.to_owned()));
    }
    Ok(())
}

/// In-process storage; contents are lost on drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: FxHashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        check_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        check_key(key)?;
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<bool> {
        check_key(key)?;
        Ok(self.entries.remove(key).is_some())
    }
}

/// One JSON file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// The directory is created lazily on the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9._-]` become `_`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{file}.json"))
    }

    fn io_error(key: &str, source: io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_owned(),
            source,
        }
    }
}

impl StorageBackend for FileStorage {
    fn name(&self) -> &str {
        "file"
    }

    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        check_key(key)?;
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        check_key(key)?;
        std::fs::create_dir_all(&self.root).map_err(|e| Self::io_error(key, e))?;
        let path = self.path_for(key);

        // Atomic write: temp file then rename
        let temp = path.with_extension("json.tmp");
        std::fs::write(&temp, value).map_err(|e| Self::io_error(key, e))?;
        std::fs::rename(&temp, &path).map_err(|e| Self::io_error(key, e))?;

        tracing::debug!(
            target: "mythoras.storage",
            key,
            path = %path.display(),
            bytes = value.len(),
            "saved"
        );
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<bool> {
        check_key(key)?;
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.load("k").unwrap(), None);
        storage.save("k", "v").unwrap();
        assert_eq!(storage.load("k").unwrap().as_deref(), Some("v"));
        assert!(storage.remove("k").unwrap());
        assert!(!storage.remove("k").unwrap());
        assert!(storage.is_empty());
    }

    #[test]
    fn blank_keys_are_rejected() {
        let mut storage = MemoryStorage::new();
        assert!(matches!(
            storage.save("  ", "v"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(storage.load("").is_err());
    }

    #[test]
    fn file_round_trip_is_atomic() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.load("mythoras-layouts").unwrap(), None);

        storage.save("mythoras-layouts", "{\"a\":1}").unwrap();
        let path = storage.path_for("mythoras-layouts");
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(
            storage.load("mythoras-layouts").unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        storage.save("mythoras-layouts", "{}").unwrap();
        assert_eq!(storage.load("mythoras-layouts").unwrap().as_deref(), Some("{}"));
        assert!(storage.remove("mythoras-layouts").unwrap());
        assert!(!storage.remove("mythoras-layouts").unwrap());
    }

    #[test]
    fn keys_are_sanitized() {
        let storage = FileStorage::new("/tmp/root");
        assert_eq!(
            storage.path_for("../etc/pass wd"),
            PathBuf::from("/tmp/root/.._etc_pass_wd.json")
        );
    }

    #[test]
    fn io_error_names_key() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a dir").unwrap();
        let mut storage = FileStorage::new(&blocker);
        let err = storage.save("k", "v").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert!(err.to_string().contains("\"k\""));
    }
}
