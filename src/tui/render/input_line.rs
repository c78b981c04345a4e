use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::KeyValueStore;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

const PROMPT: &str = " \u{203A} ";

/// Render the new-item input: typed text, or the context's placeholder
pub fn render_input_line<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;
    let focused = app.mode == Mode::Input;
    let prompt_width = unicode::display_width(PROMPT);
    let available = (area.width as usize).saturating_sub(prompt_width + 1);

    let prompt_color = if focused { app.theme.highlight } else { app.theme.dim };
    let mut spans = vec![Span::styled(PROMPT, Style::default().fg(prompt_color).bg(bg))];

    if app.input_buffer.is_empty() {
        let placeholder = app
            .store()
            .map(|store| store.context())
            .unwrap_or_default()
            .placeholder();
        spans.push(Span::styled(
            unicode::truncate_to_width(placeholder, available),
            Style::default()
                .fg(app.theme.dim)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        ));
    } else {
        let start = scroll_start(&app.input_buffer, app.input_cursor, available);
        let visible = unicode::truncate_to_width(
            &unicode::single_line(&app.input_buffer[start..]),
            available,
        );
        spans.push(Span::styled(visible, Style::default().fg(app.theme.text_bright).bg(bg)));
    }

    if let Some(label) = editing_label(app) {
        super::helpers::push_right_aligned(
            &mut spans,
            Span::styled(label, Style::default().fg(app.theme.dim).bg(bg)),
            area.width as usize,
            Style::default().bg(bg),
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );

    if focused {
        let start = scroll_start(&app.input_buffer, app.input_cursor, available);
        let col = unicode::display_width(&app.input_buffer[start..app.input_cursor]);
        frame.set_cursor_position(Position::new(
            area.x + (prompt_width + col) as u16,
            area.y,
        ));
    }
}

fn editing_label<S: KeyValueStore>(app: &App<S>) -> Option<&'static str> {
    (app.mode == Mode::Input && app.editing_key.is_some()).then_some("editing ")
}

/// First byte of the input shown so that the caret stays on screen.
fn scroll_start(buffer: &str, cursor: usize, available: usize) -> usize {
    let mut start = 0;
    while unicode::byte_offset_to_display_col(&buffer[start..], cursor - start) >= available {
        match unicode::next_grapheme_boundary(buffer, start) {
            Some(next) if next <= cursor => start = next,
            _ => break,
        }
    }
    start
}
