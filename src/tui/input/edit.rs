use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::storage::KeyValueStore;
use crate::ops::store::StoreError;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

pub(super) fn handle_input<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => leave_input(app),
        KeyCode::Enter => submit(app),

        KeyCode::Backspace if ctrl || alt => delete_word_left(app),
        KeyCode::Char('w') if ctrl => delete_word_left(app),
        KeyCode::Char('u') if ctrl => {
            app.input_buffer.drain(..app.input_cursor);
            app.input_cursor = 0;
        }
        KeyCode::Char('a') if ctrl => app.input_cursor = 0,
        KeyCode::Char('e') if ctrl => app.input_cursor = app.input_buffer.len(),

        KeyCode::Backspace => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.input_buffer, app.input_cursor) {
                app.input_buffer.drain(prev..app.input_cursor);
                app.input_cursor = prev;
            }
        }
        KeyCode::Delete => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.input_buffer, app.input_cursor) {
                app.input_buffer.drain(app.input_cursor..next);
            }
        }
        KeyCode::Left => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.input_buffer, app.input_cursor) {
                app.input_cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.input_buffer, app.input_cursor) {
                app.input_cursor = next;
            }
        }
        KeyCode::Home => app.input_cursor = 0,
        KeyCode::End => app.input_cursor = app.input_buffer.len(),

        KeyCode::Char(c) if !ctrl => {
            app.input_buffer.insert(app.input_cursor, c);
            app.input_cursor += c.len_utf8();
        }
        _ => {}
    }
}

fn delete_word_left<S: KeyValueStore>(app: &mut App<S>) {
    let start = unicode::word_boundary_left(&app.input_buffer, app.input_cursor);
    app.input_buffer.drain(start..app.input_cursor);
    app.input_cursor = start;
}

fn leave_input<S: KeyValueStore>(app: &mut App<S>) {
    app.input_buffer.clear();
    app.input_cursor = 0;
    app.editing_key = None;
    app.mode = Mode::Navigate;
}

/// Enter: add a new item, or save the edit in progress.
///
/// Empty text changes nothing and keeps the input open. A failed save still
/// counts as applied, since the store keeps the change in memory.
fn submit<S: KeyValueStore>(app: &mut App<S>) {
    let text = app.input_buffer.clone();
    let editing = app.editing_key.clone();
    let Some(store) = app.store_mut() else {
        return;
    };

    let (applied, error) = match &editing {
        Some(key) => match store.edit_text(key, &text) {
            Ok(changed) => (changed, None),
            Err(e @ StoreError::Persist(_)) => (true, Some(e)),
            Err(e) => (false, Some(e)),
        },
        None => match store.add_item(&text) {
            Ok(added) => (added.is_some(), None),
            Err(e @ StoreError::Persist(_)) => (true, Some(e)),
            Err(e) => (false, Some(e)),
        },
    };

    if let Some(e) = error {
        app.status_message = Some(e.to_string());
    }
    if !applied {
        return;
    }

    if editing.is_some() {
        leave_input(app);
    } else {
        // Stay in the input line for the next item, with the new one selected
        app.input_buffer.clear();
        app.input_cursor = 0;
        app.cursor = app.visible_keys().len().saturating_sub(1);
    }
}
