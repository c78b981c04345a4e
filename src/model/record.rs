use serde::{Deserialize, Serialize};

use super::todo::{Context, TodoCollection};

/// Storage key holding the whole record
pub const RECORD_KEY: &str = "@toDos";

/// Current record format version
pub const RECORD_VERSION: u32 = 1;

/// Key that held the context flag (`"true"` / `"false"`) before it moved
/// into the record
pub const LEGACY_CONTEXT_KEY: &str = "working";

/// Everything that survives a restart: the context flag and the items,
/// stored together under [`RECORD_KEY`] so one write covers both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredRecord {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(rename = "working", default)]
    pub context: Context,
    #[serde(rename = "toDos", default)]
    pub items: TodoCollection,
}

fn current_version() -> u32 {
    RECORD_VERSION
}

impl Default for StoredRecord {
    fn default() -> Self {
        StoredRecord {
            version: RECORD_VERSION,
            context: Context::Work,
            items: TodoCollection::new(),
        }
    }
}

/// What may be found under [`RECORD_KEY`]: the current record, or the bare
/// item mapping written before the record carried the context flag.
/// Anything else fails to parse.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordShape {
    Current(StoredRecord),
    Legacy(TodoCollection),
}
