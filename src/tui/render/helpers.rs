use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::tui::editor::LineInput;
use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Pad a line out to `width` with the background style, then append a
/// right-aligned hint if it fits.
pub(super) fn with_right_hint<'a>(
    mut spans: Vec<Span<'a>>,
    hint: &'a str,
    width: usize,
    pad_style: Style,
    hint_style: Style,
) -> Line<'a> {
    let content = spans_width(&spans);
    let hint_w = unicode::display_width(hint);
    if content + hint_w < width {
        spans.push(Span::styled(" ".repeat(width - content - hint_w), pad_style));
        spans.push(Span::styled(hint, hint_style));
    }
    Line::from(spans)
}

/// Spans for a single-line input with a `▌` cursor when focused
pub(super) fn input_spans<'a>(
    input: &'a LineInput,
    focused: bool,
    text_style: Style,
    cursor_style: Style,
) -> Vec<Span<'a>> {
    if !focused {
        return vec![Span::styled(input.text(), text_style)];
    }
    let (before, after) = input.text().split_at(input.cursor());
    vec![
        Span::styled(before, text_style),
        Span::styled("\u{258C}", cursor_style),
        Span::styled(after, text_style),
    ]
}

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Centered rectangle of a fixed size, shrunk to fit the parent
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect_fixed(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect_fixed(40, 40, area), area);
    }

    #[test]
    fn test_input_spans_cursor_position() {
        let mut input = LineInput::new();
        input.set_text("abc");
        input.move_left();
        let spans = input_spans(&input, true, Style::default(), Style::default());
        let text: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, vec!["ab", "\u{258C}", "c"]);
    }
}
