use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which list is active: work items or travel items.
///
/// On disk this is the boolean `working` (`true` = Work), the shape the
/// todo records have always had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Context {
    #[default]
    Work,
    Travel,
}

impl Context {
    /// Tag shown next to an item
    pub fn tag(self) -> &'static str {
        match self {
            Context::Work => "WORK",
            Context::Travel => "TRAVEL",
        }
    }

    /// Tab label in the header
    pub fn label(self) -> &'static str {
        match self {
            Context::Work => "Work",
            Context::Travel => "Travel",
        }
    }

    /// Placeholder for the new-item input
    pub fn placeholder(self) -> &'static str {
        match self {
            Context::Work => "Add Todo",
            Context::Travel => "Where do you want to go?",
        }
    }

    pub fn toggled(self) -> Context {
        match self {
            Context::Work => Context::Travel,
            Context::Travel => Context::Work,
        }
    }

    pub fn is_working(self) -> bool {
        self == Context::Work
    }

    pub fn from_working(working: bool) -> Context {
        if working { Context::Work } else { Context::Travel }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Context::Work => write!(f, "work"),
            Context::Travel => write!(f, "travel"),
        }
    }
}

impl FromStr for Context {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "work" | "w" => Ok(Context::Work),
            "travel" | "t" => Ok(Context::Travel),
            other => Err(format!("invalid context '{}' (expected work or travel)", other)),
        }
    }
}

impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.is_working())
    }
}

impl<'de> Deserialize<'de> for Context {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bool::deserialize(deserializer).map(Context::from_working)
    }
}

/// Opaque item key. New keys are creation timestamps in epoch milliseconds.
pub type TodoKey = String;

/// A single todo entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub text: String,
    /// Owning context, fixed at creation
    #[serde(rename = "working")]
    pub context: Context,
    #[serde(default)]
    pub completed: bool,
}

impl TodoItem {
    pub fn new(text: String, context: Context) -> Self {
        TodoItem {
            text,
            context,
            completed: false,
        }
    }
}

/// All items, in creation order
pub type TodoCollection = IndexMap<TodoKey, TodoItem>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_context_as_working_flag() {
        let item = TodoItem::new("Pack bags".into(), Context::Travel);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"text":"Pack bags","working":false,"completed":false}"#);
    }

    #[test]
    fn item_deserializes_without_completed() {
        let item: TodoItem = serde_json::from_str(r#"{"text":"x","working":true}"#).unwrap();
        assert_eq!(item.context, Context::Work);
        assert!(!item.completed);
    }

    #[test]
    fn collection_keeps_file_order() {
        let json = r#"{
            "1700000000002": {"text":"b","working":true,"completed":false},
            "1700000000001": {"text":"a","working":false,"completed":true}
        }"#;
        let items: TodoCollection = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = items.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["1700000000002", "1700000000001"]);
    }

    #[test]
    fn parse_context() {
        assert_eq!("work".parse::<Context>(), Ok(Context::Work));
        assert_eq!("TRAVEL".parse::<Context>(), Ok(Context::Travel));
        assert_eq!("t".parse::<Context>(), Ok(Context::Travel));
        assert!("home".parse::<Context>().is_err());
    }

    #[test]
    fn toggled_flips() {
        assert_eq!(Context::Work.toggled(), Context::Travel);
        assert_eq!(Context::Travel.toggled(), Context::Work);
        assert_eq!(Context::default(), Context::Work);
    }
}
