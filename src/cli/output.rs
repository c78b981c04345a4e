use serde::Serialize;

use crate::model::{Context, TodoItem};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TodoJson {
    pub key: String,
    pub text: String,
    pub context: String,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct ListJson {
    /// Context that was listed, absent for `--all`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub todos: Vec<TodoJson>,
}

#[derive(Serialize)]
pub struct ContextJson {
    pub context: String,
}

pub fn todo_to_json(key: &str, item: &TodoItem) -> TodoJson {
    TodoJson {
        key: key.to_string(),
        text: item.text.clone(),
        context: item.context.to_string(),
        completed: item.completed,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `[x] Buy milk  (1700000000000)`, with the context tag when `show_tag`
pub fn format_todo_line(key: &str, item: &TodoItem, show_tag: bool) -> String {
    let check = if item.completed { "[x]" } else { "[ ]" };
    if show_tag {
        format!("{} {}  {}  ({})", check, item.text, item.context.tag(), key)
    } else {
        format!("{} {}  ({})", check, item.text, key)
    }
}

/// Header above a list: `Work (1/3 done)`
pub fn format_list_header(context: Context, total: usize, done: usize) -> String {
    format!("{} ({}/{} done)", context.label(), done, total)
}
