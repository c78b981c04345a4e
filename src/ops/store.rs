use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::io::recovery::{RecoveryCategory, RecoveryEntry, log_recovery};
use crate::io::storage::{FileStore, KeyValueStore, StorageError};
use crate::model::record::{LEGACY_CONTEXT_KEY, RECORD_KEY, RecordShape, StoredRecord};
use crate::model::todo::{Context, TodoCollection, TodoItem, TodoKey};

/// Error type for todo store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not load todos: {0}")]
    Load(#[source] StorageError),
    #[error("stored todos are unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("no todo with key {0}")]
    NotFound(TodoKey),
    /// The in-memory change stands; only the write failed.
    #[error("change not saved: {0}")]
    Persist(#[source] StorageError),
}

/// Owns the todo items and the context flag, and keeps the stored record in
/// step with them.
///
/// A store only exists once [`TodoStore::load`] has succeeded, so no
/// mutation can run ahead of the initial read. Every mutation takes the
/// backend lock, re-reads the stored record so changes made by another
/// process are not overwritten, applies the change and writes the whole
/// record under [`RECORD_KEY`] before releasing the lock.
///
/// A failed write leaves memory as the source of truth: the change is kept,
/// the unwritten record goes to the recovery log, and the caller receives
/// [`StoreError::Persist`]. Until a later write succeeds, memory is not
/// replaced by what is on disk.
#[derive(Debug)]
pub struct TodoStore<S: KeyValueStore> {
    backend: S,
    record: StoredRecord,
    recovery_dir: Option<PathBuf>,
    unsaved: bool,
}

impl<S: KeyValueStore> TodoStore<S> {
    /// Read the stored record. An absent record means no items and the Work
    /// context. Read and parse failures are returned as-is.
    pub fn load(backend: S) -> Result<Self, StoreError> {
        let record = match read_record(&backend)? {
            Some(record) => record,
            None => StoredRecord {
                context: legacy_context(&backend)?,
                ..Default::default()
            },
        };
        Ok(TodoStore {
            backend,
            record,
            recovery_dir: None,
            unsaved: false,
        })
    }

    /// Log failed writes and deletions to the recovery log in `dir`.
    pub fn with_recovery_log(mut self, dir: &Path) -> Self {
        self.recovery_dir = Some(dir.to_path_buf());
        self
    }

    pub fn context(&self) -> Context {
        self.record.context
    }

    pub fn items(&self) -> &TodoCollection {
        &self.record.items
    }

    pub fn get(&self, key: &str) -> Option<&TodoItem> {
        self.record.items.get(key)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Items belonging to the current context, in collection order.
    pub fn visible_items(&self) -> Vec<(&TodoKey, &TodoItem)> {
        let context = self.record.context;
        self.record
            .items
            .iter()
            .filter(|(_, item)| item.context == context)
            .collect()
    }

    /// (visible, visible and completed)
    pub fn visible_counts(&self) -> (usize, usize) {
        self.visible_items()
            .iter()
            .fold((0, 0), |(total, done), (_, item)| {
                (total + 1, done + usize::from(item.completed))
            })
    }

    pub fn set_context(&mut self, context: Context) -> Result<(), StoreError> {
        self.commit(|record| {
            record.context = context;
            Ok(())
        })
    }

    /// Add an item to the current context. Empty text is ignored and returns
    /// `Ok(None)`; text is not trimmed, so whitespace-only text is accepted.
    pub fn add_item(&mut self, text: &str) -> Result<Option<TodoKey>, StoreError> {
        if text.is_empty() {
            return Ok(None);
        }
        let now_ms = Utc::now().timestamp_millis();
        self.commit(|record| {
            let key = fresh_key(&record.items, now_ms);
            let item = TodoItem::new(text.to_string(), record.context);
            record.items.insert(key.clone(), item);
            Ok(Some(key))
        })
    }

    /// Flip completion, returning the new state.
    pub fn toggle_complete(&mut self, key: &str) -> Result<bool, StoreError> {
        self.commit(|record| {
            let item = record
                .items
                .get_mut(key)
                .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
            item.completed = !item.completed;
            Ok(item.completed)
        })
    }

    /// Replace an item's text; its context never changes. Empty text is
    /// ignored like in [`TodoStore::add_item`] and returns `Ok(false)`.
    pub fn edit_text(&mut self, key: &str, text: &str) -> Result<bool, StoreError> {
        self.commit(|record| {
            let item = record
                .items
                .get_mut(key)
                .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
            if text.is_empty() {
                return Ok(false);
            }
            item.text = text.to_string();
            Ok(true)
        })
    }

    /// Remove an item. Callers confirm with the user first. An absent key
    /// is a no-op returning `Ok(None)`.
    pub fn delete_item(&mut self, key: &str) -> Result<Option<TodoItem>, StoreError> {
        let recovery_dir = self.recovery_dir.clone();
        self.commit(|record| {
            let Some(item) = record.items.shift_remove(key) else {
                return Ok(None);
            };
            if let Some(dir) = &recovery_dir {
                log_recovery(
                    dir,
                    RecoveryEntry::new(RecoveryCategory::Delete, "todo deleted")
                        .field("Key", key)
                        .field("Context", item.context.tag())
                        .body(serde_json::to_string(&item)?),
                );
            }
            Ok(Some(item))
        })
    }

    /// Apply `change` to the latest stored record and write it back, all
    /// under the backend lock. Nothing is written when `change` fails or
    /// leaves the record as it was.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut StoredRecord) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let guard = self.backend.lock();
        if guard.is_ok() {
            self.refresh();
        }

        let before = self.record.clone();
        let out = change(&mut self.record)?;
        if self.record == before {
            return Ok(out);
        }

        let json = serde_json::to_string(&self.record)?;
        let written = match guard {
            Ok(_guard) => self.backend.set_item(RECORD_KEY, &json),
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            self.unsaved = true;
            if let Some(dir) = &self.recovery_dir {
                log_recovery(
                    dir,
                    RecoveryEntry::new(RecoveryCategory::Write, "record write failed")
                        .field("Key", RECORD_KEY)
                        .field("Error", e.to_string())
                        .body(json),
                );
            }
            return Err(StoreError::Persist(e));
        }
        self.unsaved = false;
        Ok(out)
    }

    /// Pick up writes made by other processes since the last read. Memory
    /// is kept when it holds unsaved changes or the stored record cannot be
    /// read.
    fn refresh(&mut self) {
        if self.unsaved {
            return;
        }
        if let Ok(Some(latest)) = read_record(&self.backend) {
            self.record = latest;
        }
    }
}

/// Parse the record under [`RECORD_KEY`], or `None` when there is none. A
/// bare item mapping takes its context from [`LEGACY_CONTEXT_KEY`].
fn read_record<S: KeyValueStore>(backend: &S) -> Result<Option<StoredRecord>, StoreError> {
    let raw = match backend.get_item(RECORD_KEY).map_err(StoreError::Load)? {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(None),
    };
    let record = match serde_json::from_str(&raw)? {
        RecordShape::Current(record) => record,
        RecordShape::Legacy(items) => StoredRecord {
            context: legacy_context(backend)?,
            items,
            ..Default::default()
        },
    };
    Ok(Some(record))
}

/// Context from the old `"true"` / `"false"` flag; Work unless it says false.
fn legacy_context<S: KeyValueStore>(backend: &S) -> Result<Context, StoreError> {
    let flag = backend
        .get_item(LEGACY_CONTEXT_KEY)
        .map_err(StoreError::Load)?;
    Ok(Context::from_working(
        flag.is_none_or(|raw| raw.trim() != "false"),
    ))
}

/// A key derived from `now_ms` that is not in use yet.
fn fresh_key(items: &TodoCollection, now_ms: i64) -> TodoKey {
    let mut candidate = now_ms;
    while items.contains_key(candidate.to_string().as_str()) {
        candidate += 1;
    }
    candidate.to_string()
}

/// Open the file-backed store in `data_dir` and load it, with the recovery
/// log kept alongside.
pub fn open_file_store(data_dir: &Path) -> Result<TodoStore<FileStore>, StoreError> {
    let backend = FileStore::open(data_dir).map_err(StoreError::Load)?;
    Ok(TodoStore::load(backend)?.with_recovery_log(data_dir))
}
