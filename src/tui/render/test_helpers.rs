use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::io::storage::MemoryStore;
use crate::model::{Context, UiConfig};
use crate::ops::store::TodoStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return it with styles intact.
pub fn render_to_buffer<F>(w: u16, h: u16, f: F) -> Buffer
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let buf = render_to_buffer(w, h, f);
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An app still waiting for its store.
pub fn loading_app() -> App<MemoryStore> {
    App::new(&UiConfig::default())
}

/// A loaded app in the Work context with the given items.
pub fn ready_app(work: &[&str], travel: &[&str]) -> App<MemoryStore> {
    ready_app_with(&UiConfig::default(), work, travel)
}

pub fn ready_app_with(ui: &UiConfig, work: &[&str], travel: &[&str]) -> App<MemoryStore> {
    let mut store = TodoStore::load(MemoryStore::new()).unwrap();
    for text in work {
        store.add_item(text).unwrap();
    }
    store.set_context(Context::Travel).unwrap();
    for text in travel {
        store.add_item(text).unwrap();
    }
    store.set_context(Context::Work).unwrap();

    let mut app = App::new(ui);
    app.finish_loading(Ok(store));
    app
}
