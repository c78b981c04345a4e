mod helpers;
pub mod header;
pub mod input_line;
pub mod list_view;
pub mod status_row;

#[cfg(test)]
pub(crate) mod test_helpers;

use chrono::{Datelike, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Paragraph};

use crate::io::storage::KeyValueStore;

use super::app::App;

/// Main render function — lays out the single screen
pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2) | input (1) | gap (1) | list | footer (0-1) | status row (1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(u16::from(app.show_footer)),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    input_line::render_input_line(frame, app, chunks[1]);
    list_view::render_list_view(frame, app, chunks[3]);
    if app.show_footer {
        render_footer(frame, app, chunks[4]);
    }
    status_row::render_status_row(frame, app, chunks[5]);
}

fn render_footer<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let footer = Paragraph::new(format!("copyright \u{00A9} {}", Local::now().year()))
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::model::UiConfig;

    #[test]
    fn loading_screen() {
        let mut app = loading_app();
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(output.contains("Loading\u{2026}"));
        assert!(output.contains("Add Todo"));
        assert!(output.contains(&format!("copyright \u{00A9} {}", Local::now().year())));
    }

    #[test]
    fn full_screen_shows_current_context_only() {
        let mut app = ready_app(&["Buy milk", "Call mom"], &["Lisbon"]);
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(output.contains("[ ] Buy milk"));
        assert!(output.contains("[ ] Call mom"));
        assert!(!output.contains("Lisbon"));
        assert!(output.contains("WORK"));
    }

    #[test]
    fn footer_can_be_hidden() {
        let ui = UiConfig {
            show_footer: false,
            ..UiConfig::default()
        };
        let mut app = ready_app_with(&ui, &["Buy milk"], &[]);
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(!output.contains("copyright"));
    }
}
