use ratatui::style::Style;
use ratatui::text::Span;

use crate::util::unicode;

/// Checkbox for a todo row (markdown style)
pub(super) fn checkbox(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

/// Total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Pad `spans` so that `right` ends flush with `width`. `right` is dropped
/// when it does not fit.
pub(super) fn push_right_aligned<'a>(
    spans: &mut Vec<Span<'a>>,
    right: Span<'a>,
    width: usize,
    pad_style: Style,
) {
    let used = spans_width(spans);
    let right_width = unicode::display_width(&right.content);
    if used + right_width < width {
        spans.push(Span::styled(" ".repeat(width - used - right_width), pad_style));
        spans.push(right);
    }
}
