use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::session::{DetailTab, LogFocus, TaskDetailMode, ViewState};
use crate::tui::app::App;

use super::helpers::{input_spans, with_right_hint};

/// Key hints for the current context
fn hints(app: &App) -> &'static str {
    let session = &app.session;
    match session.view() {
        ViewState::List => "Enter open  n new  d delete  / filter  ? help  q quit",
        ViewState::ProjectDetail => match session.tab() {
            DetailTab::Details => "1-3 tabs  u edit  t task  l log  Esc back  ? help",
            DetailTab::Tasks if app.quick_add.is_some() => "Enter add  Esc cancel",
            DetailTab::Tasks if session.task_mode() == TaskDetailMode::Edit => {
                "Tab field  Enter next/save  Esc cancel"
            }
            DetailTab::Tasks => "Space done  c completed  n add  e edit  d delete  ? help",
            DetailTab::Logs if session.log_focus() == LogFocus::Pager => {
                "jk scroll  Tab list  Esc close"
            }
            DetailTab::Logs => "Enter open  n new  e edit  d delete  Tab pager  ? help",
        },
        ViewState::DeleteProjectConfirm
        | ViewState::DeleteTaskConfirm
        | ViewState::DeleteLogConfirm => "y delete  n cancel",
        _ => "ctrl+s save  Esc cancel",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let pad = Style::default().bg(bg);
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let line = if let Some(err) = app.last_error() {
        Line::from(Span::styled(
            format!(" {}", err),
            Style::default()
                .fg(app.theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
    } else if let Some(input) = &app.filter_input {
        // Filter prompt: /pattern▌
        let text = Style::default().fg(app.theme.text_bright).bg(bg);
        let mut spans = vec![Span::styled("/", text)];
        spans.extend(input_spans(input, true, text, text.fg(app.theme.highlight)));
        with_right_hint(spans, "Enter keep  Esc clear", width, pad, dim)
    } else if app.show_key_hints {
        with_right_hint(Vec::new(), hints(app), width, pad, dim)
    } else {
        Line::from(Span::styled(" ".repeat(width), pad))
    };

    let paragraph = Paragraph::new(line).style(pad);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::editor::LineInput;
    use crate::tui::render::test_helpers::*;

    fn status(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, app, area);
        })
    }

    #[test]
    fn shows_hints_right_aligned() {
        let app = empty_app();
        let output = status(&app);
        assert!(output.ends_with("? help  q quit"));
        assert!(output.starts_with(' '));
    }

    #[test]
    fn shows_error_instead_of_hints() {
        let mut app = empty_app();
        app.session.go_to_update_view();
        let output = status(&app);
        assert_eq!(output, " no project selected");
    }

    #[test]
    fn shows_filter_prompt() {
        let mut app = empty_app();
        let mut input = LineInput::new();
        input.set_text("gar");
        app.filter_input = Some(input);
        assert!(status(&app).starts_with("/gar\u{258C}"));
    }

    #[test]
    fn hints_can_be_disabled() {
        let mut app = empty_app();
        app.show_key_hints = false;
        assert_eq!(status(&app), "");
    }
}
