use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::KeyValueStore;
use crate::model::TodoItem;
use crate::tui::app::{App, LoadState};
use crate::util::unicode;

use super::helpers::{checkbox, push_right_aligned, spans_width};

/// Render the items of the current context, or the load state
pub fn render_list_view<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let height = area.height as usize;

    let lines: Vec<Line> = match &app.load {
        LoadState::Loading => vec![Line::from(Span::styled(
            "  Loading\u{2026}",
            Style::default().fg(app.theme.dim).bg(bg),
        ))],
        LoadState::Failed(message) => vec![Line::from(Span::styled(
            format!("  {}", unicode::truncate_to_width(message, width.saturating_sub(2))),
            Style::default().fg(app.theme.red).bg(bg),
        ))],
        LoadState::Ready(store) => {
            let items = store.visible_items();
            if items.is_empty() {
                vec![Line::from(Span::styled(
                    "  Nothing here yet",
                    Style::default().fg(app.theme.dim).bg(bg),
                ))]
            } else {
                // Keep the cursor row on screen
                if app.cursor < app.scroll_offset {
                    app.scroll_offset = app.cursor;
                } else if height > 0 && app.cursor >= app.scroll_offset + height {
                    app.scroll_offset = app.cursor + 1 - height;
                }
                items
                    .iter()
                    .enumerate()
                    .skip(app.scroll_offset)
                    .take(height)
                    .map(|(i, (_, item))| item_line(app, item, i == app.cursor, width))
                    .collect()
            }
        }
    };

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

/// One row: cursor marker, checkbox, text, and the context tag flush right
fn item_line<'a, S: KeyValueStore>(
    app: &App<S>,
    item: &TodoItem,
    selected: bool,
    width: usize,
) -> Line<'a> {
    let row_bg = if selected { app.theme.item_bg } else { app.theme.background };
    let base = Style::default().bg(row_bg);
    let tag = item.context.tag();

    let marker = if selected { "\u{25B8} " } else { "  " };
    let mut spans = vec![
        Span::styled(marker, base.fg(app.theme.highlight)),
        Span::styled(format!("{} ", checkbox(item.completed)), base.fg(app.theme.text)),
    ];

    // Room for the text: leave the tag and a space either side of it
    let used = spans_width(&spans);
    let text_room = width.saturating_sub(used + unicode::display_width(tag) + 2);
    let text = unicode::truncate_to_width(&unicode::single_line(&item.text), text_room);
    let text_style = if item.completed {
        base.fg(app.theme.dim).add_modifier(Modifier::CROSSED_OUT)
    } else if selected {
        base.fg(app.theme.text_bright)
    } else {
        base.fg(app.theme.text)
    };
    spans.push(Span::styled(text, text_style));

    push_right_aligned(
        &mut spans,
        Span::styled(format!("{} ", tag), base.fg(app.theme.dim)),
        width,
        base,
    );
    Line::from(spans)
}
