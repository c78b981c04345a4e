use crossterm::event::{KeyCode, KeyEvent};

use crate::io::storage::KeyValueStore;
use crate::model::Context;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Context switcher
        KeyCode::Tab | KeyCode::BackTab => {
            if let Some(current) = app.store().map(|s| s.context()) {
                switch_context(app, current.toggled());
            }
        }
        KeyCode::Char('w') => switch_context(app, Context::Work),
        KeyCode::Char('t') => switch_context(app, Context::Travel),

        // Movement
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.visible_keys().len().saturating_sub(1);
        }

        // New item
        KeyCode::Char('i') | KeyCode::Char('a') => {
            app.editing_key = None;
            app.input_buffer.clear();
            app.input_cursor = 0;
            app.mode = Mode::Input;
        }

        KeyCode::Char(' ') | KeyCode::Enter => toggle_selected(app),

        KeyCode::Char('e') => {
            if let Some(key) = app.selected_key()
                && let Some(text) = app.selected_item().map(|item| item.text.clone())
            {
                app.input_cursor = text.len();
                app.input_buffer = text;
                app.editing_key = Some(key);
                app.mode = Mode::Input;
            }
        }

        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(key) = app.selected_key() {
                app.pending_delete = Some(key);
                app.mode = Mode::Confirm;
            }
        }

        _ => {}
    }
}

fn switch_context<S: KeyValueStore>(app: &mut App<S>, context: Context) {
    let Some(store) = app.store_mut() else {
        return;
    };
    if store.context() == context {
        return;
    }
    let result = store.set_context(context);
    app.report(result);
    app.cursor = 0;
    app.scroll_offset = 0;
}

fn move_cursor<S: KeyValueStore>(app: &mut App<S>, delta: isize) {
    let count = app.visible_keys().len();
    if count == 0 {
        app.cursor = 0;
        return;
    }
    app.cursor = app.cursor.saturating_add_signed(delta).min(count - 1);
}

fn toggle_selected<S: KeyValueStore>(app: &mut App<S>) {
    let Some(key) = app.selected_key() else {
        return;
    };
    if let Some(store) = app.store_mut() {
        let result = store.toggle_complete(&key);
        app.report(result);
    }
}
