use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::ProjectStatus;
use crate::session::ViewState;
use crate::tui::app::App;
use crate::tui::editor::TextArea;
use crate::tui::forms::{LogField, ProjectField, TaskField};

use super::helpers::{centered_rect, centered_rect_fixed, input_spans};

struct Styles {
    label: Style,
    focused_label: Style,
    text: Style,
    cursor: Style,
    hint: Style,
}

fn styles(app: &App) -> Styles {
    let bg = app.theme.background;
    Styles {
        label: Style::default().fg(app.theme.dim).bg(bg),
        focused_label: Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
        text: Style::default().fg(app.theme.text_bright).bg(bg),
        cursor: Style::default().fg(app.theme.highlight).bg(bg),
        hint: Style::default().fg(app.theme.dim).bg(bg),
    }
}

impl Styles {
    fn label(&self, focused: bool) -> Style {
        if focused { self.focused_label } else { self.label }
    }
}

fn popup(frame: &mut Frame, app: &App, title: &str, lines: Vec<Line>, area: Rect) {
    frame.render_widget(Clear, area);
    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_focused).bg(bg))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Lines of a text area, with a `▌` cursor when focused. Rows scroll so the
/// cursor row stays within `height`.
fn text_area_lines<'a>(area: &'a TextArea, focused: bool, s: &Styles, height: usize) -> Vec<Line<'a>> {
    let (row, col) = area.cursor();
    let skip = row.saturating_sub(height.saturating_sub(1));
    area.lines()
        .iter()
        .enumerate()
        .skip(skip)
        .take(height.max(1))
        .map(|(i, line)| {
            if focused && i == row {
                let (before, after) = line.split_at(col);
                Line::from(vec![
                    Span::styled(before, s.text),
                    Span::styled("\u{258C}", s.cursor),
                    Span::styled(after, s.text),
                ])
            } else {
                Line::from(Span::styled(line.as_str(), s.text))
            }
        })
        .collect()
}

pub fn render_project_form(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.project_form;
    let s = styles(app);
    let desc_rows = 5;

    let mut lines = vec![
        Line::from(Span::styled("Name", s.label(form.focus == ProjectField::Name))),
        Line::from(input_spans(
            &form.name,
            form.focus == ProjectField::Name,
            s.text,
            s.cursor,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Summary",
            s.label(form.focus == ProjectField::Summary),
        )),
        Line::from(input_spans(
            &form.summary,
            form.focus == ProjectField::Summary,
            s.text,
            s.cursor,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Description",
            s.label(form.focus == ProjectField::Description),
        )),
    ];
    let mut desc = text_area_lines(
        &form.description,
        form.focus == ProjectField::Description,
        &s,
        desc_rows,
    );
    desc.resize(desc_rows, Line::from(""));
    lines.extend(desc);
    lines.push(Line::from(""));

    let status_focused = form.focus == ProjectField::Status;
    let mut status_spans = vec![Span::styled("Status  ", s.label(status_focused))];
    for status in ProjectStatus::ALL {
        let style = if status == form.status {
            Style::default()
                .fg(app.theme.status_color(status))
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            s.label
        };
        status_spans.push(Span::styled(
            format!(" {} {} ", status.icon(), status.label()),
            style,
        ));
    }
    lines.push(Line::from(status_spans));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab next field  ctrl+s save  Esc cancel",
        s.hint,
    )));

    let title = if app.session.view() == ViewState::UpdateProject {
        "Edit project"
    } else {
        "New project"
    };
    let height = lines.len() as u16 + 2;
    let popup_area = centered_rect_fixed(70, height, area);
    popup(frame, app, title, lines, popup_area);
}

pub fn render_task_form(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.task_form;
    let s = styles(app);
    let title_focused = form.focus == TaskField::Title;
    let desc_focused = form.focus == TaskField::Description;
    let lines = vec![
        Line::from(Span::styled("Title", s.label(title_focused))),
        Line::from(input_spans(&form.title, title_focused, s.text, s.cursor)),
        Line::from(""),
        Line::from(Span::styled("Description", s.label(desc_focused))),
        Line::from(input_spans(&form.description, desc_focused, s.text, s.cursor)),
        Line::from(""),
        Line::from(Span::styled("Enter next/save  Esc cancel", s.hint)),
    ];
    let height = lines.len() as u16 + 2;
    let popup_area = centered_rect_fixed(60, height, area);
    popup(frame, app, "New task", lines, popup_area);
}

/// Log form: a popup for the quick create view, the whole content area for
/// the full editor.
pub fn render_log_form(frame: &mut Frame, app: &App, area: Rect, fullscreen: bool) {
    let form = &app.log_form;
    let s = styles(app);
    let title_focused = form.focus == LogField::Title;
    let body_focused = form.focus == LogField::Body;

    let target = if fullscreen {
        area
    } else {
        centered_rect(70, 60, area)
    };
    // borders, title label + input + blank, body label, hint + blank
    let body_rows = (target.height as usize).saturating_sub(2 + 3 + 1 + 2);

    let mut lines = vec![
        Line::from(Span::styled("Title", s.label(title_focused))),
        Line::from(input_spans(&form.title, title_focused, s.text, s.cursor)),
        Line::from(""),
        Line::from(Span::styled("Body", s.label(body_focused))),
    ];
    let mut body = text_area_lines(&form.body, body_focused, &s, body_rows);
    body.resize(body_rows, Line::from(""));
    lines.extend(body);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab switch field  ctrl+s save  Esc cancel",
        s.hint,
    )));

    let title = match app.session.view() {
        ViewState::UpdateLog => "Edit log",
        _ => "New log",
    };
    popup(frame, app, title, lines, target);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::forms::{LogForm, ProjectForm};
    use crate::tui::render::test_helpers::*;

    #[test]
    fn project_form_shows_status_choices() {
        let mut app = empty_app();
        app.session.go_to_create_view();
        app.project_form = ProjectForm::new();
        app.project_form.name.set_text("Shed");
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_project_form(frame, &app, area);
        });
        assert!(output.contains(" New project "));
        assert!(output.contains("Shed\u{258C}"));
        assert!(output.contains("\u{25EF} Todo"));
        assert!(output.contains("\u{25A3} Archived"));
    }

    #[test]
    fn fullscreen_log_editor_shows_body() {
        let mut app = app_in_project(&[], &[]);
        app.session.go_to_log_editor();
        app.log_form = LogForm::new();
        app.log_form.title.set_text("Notes");
        app.log_form.body.set_text("first\nsecond");
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_log_form(frame, &app, area, true);
        });
        assert!(output.contains(" New log "));
        assert!(output.contains("Notes"));
        assert!(output.contains("first"));
        assert!(output.contains("second"));
    }
}
