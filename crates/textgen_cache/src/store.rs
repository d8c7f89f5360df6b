//! Key-value stores backing the response cache.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tempfile::NamedTempFile;
use textgen_error::{CacheStoreError, CacheStoreErrorKind};
use tracing::{debug, instrument};

/// Byte-oriented persistent store.
///
/// Implementations are treated as already available; the gateway never opens or
/// closes them.
pub trait CacheStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// `Ok(None)` is a miss; `Err` means the store could not answer.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, CacheStoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), CacheStoreError>;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    ///
    /// # Errors
    ///
    /// Unavailable when the lock was poisoned by a panicking writer.
    pub fn len(&self) -> Result<usize, CacheStoreError> {
        Ok(self.entries.read().map_err(|_| poisoned())?.len())
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> Result<bool, CacheStoreError> {
        Ok(self.len()? == 0)
    }

    /// Removes every entry.
    pub fn clear(&self) -> Result<(), CacheStoreError> {
        self.entries.write().map_err(|_| poisoned())?.clear();
        Ok(())
    }
}

fn poisoned() -> CacheStoreError {
    CacheStoreError::new(CacheStoreErrorKind::Unavailable(
        "in-memory store lock poisoned".to_string(),
    ))
}

impl CacheStore for InMemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, CacheStoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), CacheStoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}

/// Store keeping one file per key inside a directory.
///
/// Each write goes to its own temporary file in the store directory and is
/// renamed into place, so readers and concurrent writers never see a partial entry.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct DiskStore {
    /// Directory holding the entries
    dir: PathBuf,
}

impl DiskStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CacheStoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            CacheStoreError::new(CacheStoreErrorKind::Unavailable(format!(
                "cannot create {}: {}",
                dir.display(),
                e
            )))
        })?;
        debug!("Opened disk cache");
        Ok(Self { dir })
    }

    /// Default location for a provider's cache: `<user cache dir>/textgen/<provider>`.
    pub fn default_dir(provider: &str) -> Option<PathBuf> {
        dirs::cache_dir().map(|base| base.join("textgen").join(provider))
    }

    fn entry_path(&self, key: &[u8]) -> PathBuf {
        let mut name = String::with_capacity(key.len() * 2 + 5);
        for byte in key {
            name.push_str(&format!("{:02x}", byte));
        }
        name.push_str(".json");
        self.dir.join(name)
    }
}

fn io_error(e: std::io::Error) -> CacheStoreError {
    CacheStoreError::new(CacheStoreErrorKind::Io(e.to_string()))
}

impl CacheStore for DiskStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, CacheStoreError> {
        match fs::read(self.entry_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(e)),
        }
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), CacheStoreError> {
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io_error)?;
        tmp.write_all(value).map_err(io_error)?;
        tmp.persist(self.entry_path(key)).map_err(|e| io_error(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_len_and_clear() {
        let store = InMemoryStore::new();
        store.put(b"k", b"v").unwrap();
        assert_eq!(store.len().unwrap(), 1);
        store.clear().unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_poisoned_lock_is_reported_everywhere() {
        let store = InMemoryStore::new();
        let _ = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _guard = store.entries.write().unwrap();
                    panic!("poison the lock");
                })
                .join()
        });

        let unavailable =
            |e: CacheStoreError| matches!(e.kind(), CacheStoreErrorKind::Unavailable(_));
        assert!(store.len().is_err_and(unavailable));
        assert!(store.clear().is_err_and(unavailable));
        assert!(store.get(b"k").is_err_and(unavailable));
        assert!(store.put(b"k", b"v").is_err_and(unavailable));
    }
}
