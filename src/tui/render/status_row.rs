use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::KeyValueStore;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::push_right_aligned;

/// Render the status row (bottom of screen)
pub fn render_status_row<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let pad = Style::default().bg(bg);

    let mut spans: Vec<Span> = Vec::new();
    if app.mode == Mode::Confirm {
        let text = app
            .pending_delete
            .as_deref()
            .and_then(|key| app.store()?.get(key))
            .map(|item| unicode::single_line(&item.text).into_owned())
            .unwrap_or_default();
        spans.push(Span::styled(
            " Delete this todo? ",
            Style::default().fg(app.theme.red).bg(bg),
        ));
        spans.push(Span::styled(
            unicode::truncate_to_width(&text, width.saturating_sub(26)),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        push_right_aligned(
            &mut spans,
            Span::styled("y/n ", Style::default().fg(app.theme.dim).bg(bg)),
            width,
            pad,
        );
    } else if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            format!(" {}", unicode::truncate_to_width(message, width.saturating_sub(1))),
            Style::default().fg(app.theme.red).bg(bg),
        ));
    } else if app.show_key_hints && app.store().is_some() {
        let hint = match app.mode {
            Mode::Input => "enter save  esc cancel ",
            _ => "i add  e edit  d delete  space toggle  tab switch  q quit ",
        };
        push_right_aligned(
            &mut spans,
            Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)),
            width,
            pad,
        );
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(pad);
    frame.render_widget(paragraph, area);
}
