use crossterm::event::{KeyCode, KeyEvent};

use crate::io::storage::KeyValueStore;
use crate::tui::app::{App, Mode};

/// Handle y/n for a pending delete
pub(super) fn handle_confirm<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let pending = app.pending_delete.take();
            app.mode = Mode::Navigate;
            if let Some(key) = pending
                && let Some(store) = app.store_mut()
            {
                let result = store.delete_item(&key);
                app.report(result);
                app.clamp_cursor();
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_delete = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStore;
    use crate::model::UiConfig;
    use crate::ops::store::TodoStore;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::*;

    fn app_with(texts: &[&str]) -> App<MemoryStore> {
        let mut store = TodoStore::load(MemoryStore::new()).unwrap();
        for text in texts {
            store.add_item(text).unwrap();
        }
        let mut app = App::new(&UiConfig::default());
        app.finish_loading(Ok(store));
        app
    }

    #[test]
    fn y_deletes_selected() {
        let mut app = app_with(&["Buy milk", "Call mom"]);
        handle_key(&mut app, ch('j'));
        handle_key(&mut app, ch('d'));
        handle_key(&mut app, ch('y'));

        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.pending_delete.is_none());
        let store = app.store().unwrap();
        assert_eq!(store.items().len(), 1);
        assert_eq!(app.selected_item().unwrap().text, "Buy milk");
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn n_and_esc_keep_item() {
        let mut app = app_with(&["Buy milk"]);
        for cancel in [ch('n'), press(KeyCode::Esc)] {
            handle_key(&mut app, ch('d'));
            handle_key(&mut app, cancel);
            assert_eq!(app.mode, Mode::Navigate);
            assert!(app.pending_delete.is_none());
        }
        assert_eq!(app.store().unwrap().items().len(), 1);
        assert_eq!(app.store().unwrap().backend().writes, 1);
    }

    #[test]
    fn other_keys_wait_for_answer() {
        let mut app = app_with(&["Buy milk"]);
        handle_key(&mut app, ch('d'));
        handle_key(&mut app, ch('j'));
        handle_key(&mut app, ch('q'));
        assert_eq!(app.mode, Mode::Confirm);
        assert!(!app.should_quit);
    }
}
