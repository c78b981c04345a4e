use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::KeyValueStore;
use crate::model::Context;
use crate::tui::app::App;

use super::helpers::push_right_aligned;

/// Render the context tabs with a separator line below
pub fn render_header<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);

    let separator = Paragraph::new("\u{2500}".repeat(area.width as usize))
        .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(separator, chunks[1]);
}

fn render_tabs<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    // While loading no tab is active
    let current = app.store().map(|store| store.context());

    let mut spans = vec![Span::styled(" ", bg_style)];
    for (i, context) in [Context::Work, Context::Travel].into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(
                "\u{2502}",
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
        spans.push(Span::styled(
            format!(" {} ", context.label()),
            tab_style(app, current == Some(context)),
        ));
    }

    if let Some(store) = app.store() {
        let (total, done) = store.visible_counts();
        push_right_aligned(
            &mut spans,
            Span::styled(
                format!("{}/{} done ", done, total),
                Style::default().fg(app.theme.dim).bg(bg),
            ),
            area.width as usize,
            bg_style,
        );
    }

    let tabs = Paragraph::new(Line::from(spans)).style(bg_style);
    frame.render_widget(tabs, area);
}

fn tab_style<S: KeyValueStore>(app: &App<S>, active: bool) -> Style {
    if active {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.item_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(app.theme.background)
    }
}
