use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::read_config;
use crate::io::storage::{FileStore, KeyValueStore};
use crate::model::{TodoItem, TodoKey, UiConfig};
use crate::ops::store::{StoreError, TodoStore, open_file_store};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the list
    Navigate,
    /// Typing into the input line
    Input,
    /// Waiting for y/n on a pending delete
    Confirm,
}

/// Where the store is in its startup
#[derive(Debug)]
pub enum LoadState<S: KeyValueStore> {
    Loading,
    Ready(TodoStore<S>),
    Failed(String),
}

/// Main application state
pub struct App<S: KeyValueStore> {
    pub load: LoadState<S>,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub show_footer: bool,
    /// Cursor index into the visible items
    pub cursor: usize,
    /// First visible row of the list
    pub scroll_offset: usize,
    /// Text being typed into the input line
    pub input_buffer: String,
    /// Byte offset of the caret in `input_buffer`
    pub input_cursor: usize,
    /// Item being edited; `None` while composing a new item
    pub editing_key: Option<TodoKey>,
    /// Item awaiting delete confirmation
    pub pending_delete: Option<TodoKey>,
    /// Error or notice shown in the status row until the next key press
    pub status_message: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(ui: &UiConfig) -> Self {
        App {
            load: LoadState::Loading,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(ui),
            show_key_hints: ui.show_key_hints,
            show_footer: ui.show_footer,
            cursor: 0,
            scroll_offset: 0,
            input_buffer: String::new(),
            input_cursor: 0,
            editing_key: None,
            pending_delete: None,
            status_message: None,
        }
    }

    /// Record the outcome of the initial load.
    pub fn finish_loading(&mut self, result: Result<TodoStore<S>, StoreError>) {
        self.load = match result {
            Ok(store) => LoadState::Ready(store),
            Err(e) => LoadState::Failed(e.to_string()),
        };
    }

    pub fn store(&self) -> Option<&TodoStore<S>> {
        match &self.load {
            LoadState::Ready(store) => Some(store),
            _ => None,
        }
    }

    pub fn store_mut(&mut self) -> Option<&mut TodoStore<S>> {
        match &mut self.load {
            LoadState::Ready(store) => Some(store),
            _ => None,
        }
    }

    /// Keys of the items shown for the current context
    pub fn visible_keys(&self) -> Vec<TodoKey> {
        self.store()
            .map(|store| {
                store
                    .visible_items()
                    .into_iter()
                    .map(|(key, _)| key.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn selected_key(&self) -> Option<TodoKey> {
        self.visible_keys().into_iter().nth(self.cursor)
    }

    pub fn selected_item(&self) -> Option<&TodoItem> {
        let key = self.selected_key()?;
        self.store()?.get(&key)
    }

    /// Keep the cursor on an existing row after the list changed.
    pub fn clamp_cursor(&mut self) {
        let count = self.visible_keys().len();
        self.cursor = if count == 0 { 0 } else { self.cursor.min(count - 1) };
    }

    /// Show a failed store operation in the status row. Every operation
    /// re-reads the record, so the list may have shrunk under the cursor.
    pub fn report<T>(&mut self, result: Result<T, StoreError>) -> Option<T> {
        self.clamp_cursor();
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.status_message = Some(e.to_string());
                None
            }
        }
    }
}

/// Run the TUI application
pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = read_config(data_dir)?;
    let mut app = App::new(&config.ui);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = load_and_run(&mut terminal, &mut app, data_dir);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Draw the loading state, load the store, then hand over to the event loop.
/// No key is read before the load has finished.
fn load_and_run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<FileStore>,
    data_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|frame| render::render(frame, app))?;
    app.finish_loading(open_file_store(data_dir));
    run_event_loop(terminal, app)
}

fn run_event_loop<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
