use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::io::lock::{DEFAULT_LOCK_TIMEOUT, LockError, WriteLock};
use crate::io::recovery::atomic_write;

/// Error type for key-value storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A local, durable string-to-string store.
pub trait KeyValueStore {
    /// Held across a read-modify-write; other writers wait until it drops.
    type Guard;

    fn lock(&self) -> Result<Self::Guard, StorageError>;
    /// Value for `key`, or `None` if it was never set.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Callers hold the guard from [`KeyValueStore::lock`] while writing.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Directory-backed store: one file per key, replaced atomically on write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir).map_err(|source| StorageError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(FileStore {
            dir: dir.to_path_buf(),
        })
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_key(key)))
    }
}

impl KeyValueStore for FileStore {
    type Guard = WriteLock;

    fn lock(&self) -> Result<WriteLock, StorageError> {
        Ok(WriteLock::acquire(&self.dir, DEFAULT_LOCK_TIMEOUT)?)
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        atomic_write(&path, value.as_bytes()).map_err(|source| StorageError::Write { path, source })
    }
}

/// Map a key to a safe file stem: `[A-Za-z0-9-]` pass through, every other
/// byte becomes `_` plus two hex digits (`@toDos` → `_40toDos`). `_` itself is
/// escaped too so the mapping stays injective.
pub fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' {
            out.push(b as char);
        } else {
            out.push_str(&format!("_{:02x}", b));
        }
    }
    out
}

/// In-memory store used by unit tests. Writes can be switched to fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    /// When set, every write fails
    pub fail_writes: bool,
    /// Number of successful writes
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = MemoryStore::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    type Guard = ();

    fn lock(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable(format!("write to {} refused", key)));
        }
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
