use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::{Project, Task};
use crate::session::{DetailTab, LogDetailMode, LogFocus, TaskDetailMode};
use crate::tui::app::App;
use crate::tui::forms::{TaskField, TaskForm};
use crate::util::unicode::truncate_to_width;

use super::helpers::input_spans;
use super::markdown::markdown_lines;

const TIME_FMT: &str = "%Y-%m-%d %H:%M";

/// Content area of the project screen for the current tab
pub fn render_detail_view(frame: &mut Frame, app: &App, area: Rect) {
    let Some(project) = app.session.selected_project() else {
        return;
    };
    match app.session.tab() {
        DetailTab::Details => render_details_tab(frame, app, project, area),
        DetailTab::Tasks => render_tasks_tab(frame, app, area),
        DetailTab::Logs => render_logs_tab(frame, app, area),
    }
}

fn render_details_tab(frame: &mut Frame, app: &App, project: &Project, area: Rect) {
    let bg = app.theme.background;
    let label = Style::default().fg(app.theme.dim).bg(bg);
    let text = Style::default().fg(app.theme.text).bg(bg);
    let status_style = Style::default()
        .fg(app.theme.status_color(project.status))
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Status    ", label),
            Span::styled(
                format!("{} {}", project.status.icon(), project.status.label()),
                status_style,
            ),
        ]),
        Line::from(vec![
            Span::styled(" Summary   ", label),
            Span::styled(project.summary.as_str(), text),
        ]),
        Line::from(vec![
            Span::styled(" Created   ", label),
            Span::styled(project.created_at.format(TIME_FMT).to_string(), text),
        ]),
        Line::from(vec![
            Span::styled(" Updated   ", label),
            Span::styled(project.updated_at.format(TIME_FMT).to_string(), text),
        ]),
        Line::from(""),
    ];
    if project.description.is_empty() {
        lines.push(Line::from(Span::styled(" No description.", label)));
    } else {
        for l in project.description.lines() {
            lines.push(Line::from(Span::styled(format!(" {}", l), text)));
        }
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(bg)),
        area,
    );
}

// ---------------------------------------------------------------------------
// Tasks tab
// ---------------------------------------------------------------------------

fn render_tasks_tab(frame: &mut Frame, app: &App, area: Rect) {
    let (list_area, pane_area) = match app.session.task_mode() {
        TaskDetailMode::None => (area, None),
        _ => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area);
            (chunks[0], Some(chunks[1]))
        }
    };

    render_task_list(frame, app, list_area);

    let Some(pane) = pane_area else {
        return;
    };
    match (app.session.task_mode(), &app.task_edit) {
        (TaskDetailMode::Edit, Some(form)) => render_task_edit(frame, app, form, pane),
        _ => {
            if let Some(task) = app.session.selected_task() {
                render_task_readonly(frame, app, task, pane);
            }
        }
    }
}

fn render_task_list(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let view = app.session.visual_tasks();
    let width = area.width as usize;
    let cursor = app.session.task_cursor();
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_row = 0;

    let mut task_line = |task: &Task, visual: usize, lines: &mut Vec<Line>| {
        let selected = visual == cursor && app.quick_add.is_none();
        if selected {
            cursor_row = lines.len();
        }
        let row_bg = if selected { app.theme.selection_bg } else { bg };
        let fg = if task.is_completed() {
            app.theme.dim
        } else if selected {
            app.theme.text_bright
        } else {
            app.theme.text
        };
        let style = Style::default().fg(fg).bg(row_bg);
        let mut spans = vec![
            Span::styled(
                if selected { "\u{25B8}" } else { " " },
                style.fg(app.theme.highlight),
            ),
            Span::styled(format!("{} ", task.checkbox()), style),
            Span::styled(truncate_to_width(&task.title, width.saturating_sub(6)), style),
        ];
        let used = super::helpers::spans_width(&spans);
        if used < width {
            spans.push(Span::styled(" ".repeat(width - used), style));
        }
        lines.push(Line::from(spans));
    };

    for (i, task) in view.pending().iter().enumerate() {
        task_line(task, i, &mut lines);
    }

    let completed = view.completed();
    if !completed.is_empty() {
        let arrow = if view.show_completed() { "\u{25BC}" } else { "\u{25B6}" };
        lines.push(Line::from(Span::styled(
            format!(" {} Completed ({})", arrow, completed.len()),
            Style::default().fg(app.theme.dim).bg(bg),
        )));
        if view.show_completed() {
            let offset = view.pending().len();
            for (j, task) in completed.iter().enumerate() {
                task_line(task, offset + j, &mut lines);
            }
        }
    }

    if view.pending().is_empty() && completed.is_empty() && app.quick_add.is_none() {
        lines.push(Line::from(Span::styled(
            " No tasks yet. Press n to add one.",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    if let Some(input) = &app.quick_add {
        let style = Style::default().fg(app.theme.text_bright).bg(bg);
        let mut spans = vec![Span::styled(" + ", style.fg(app.theme.highlight))];
        spans.extend(input_spans(input, true, style, style.fg(app.theme.highlight)));
        cursor_row = lines.len();
        lines.push(Line::from(spans));
    }

    let height = area.height as usize;
    let scroll = cursor_row.saturating_sub(height.saturating_sub(1));
    frame.render_widget(
        Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .style(Style::default().bg(bg)),
        area,
    );
}

fn pane_block<'a>(app: &App, title: &'a str, focused: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(app.theme.border_color(focused))
                .bg(app.theme.background),
        )
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.background)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(app.theme.background))
}

fn render_task_readonly(frame: &mut Frame, app: &App, task: &Task, area: Rect) {
    let bg = app.theme.background;
    let label = Style::default().fg(app.theme.dim).bg(bg);
    let text = Style::default().fg(app.theme.text).bg(bg);

    let mut lines = vec![Line::from(Span::styled(
        task.title.as_str(),
        text.fg(app.theme.text_bright).add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::from(""));
    match task.completed_at {
        Some(at) => {
            lines.push(Line::from(vec![
                Span::styled("Status: ", label),
                Span::styled("Completed", text.fg(app.theme.green)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Completed at: ", label),
                Span::styled(at.format(TIME_FMT).to_string(), text),
            ]));
        }
        None => lines.push(Line::from(vec![
            Span::styled("Status: ", label),
            Span::styled("Pending", text.fg(app.theme.yellow)),
        ])),
    }
    lines.push(Line::from(vec![
        Span::styled("Created: ", label),
        Span::styled(task.created_at.format(TIME_FMT).to_string(), text),
    ]));
    lines.push(Line::from(""));
    if task.description.is_empty() {
        lines.push(Line::from(Span::styled("No description.", label)));
    } else {
        lines.push(Line::from(Span::styled(task.description.as_str(), text)));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(pane_block(app, " Task ", false)),
        area,
    );
}

fn render_task_edit(frame: &mut Frame, app: &App, form: &TaskForm, area: Rect) {
    let bg = app.theme.background;
    let label = Style::default().fg(app.theme.dim).bg(bg);
    let text = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor = text.fg(app.theme.highlight);

    let field_label = |name: &'static str, focused: bool| {
        Span::styled(
            name,
            if focused {
                label.fg(app.theme.highlight).add_modifier(Modifier::BOLD)
            } else {
                label
            },
        )
    };

    let title_focused = form.focus == TaskField::Title;
    let desc_focused = form.focus == TaskField::Description;
    let lines = vec![
        Line::from(field_label("Title", title_focused)),
        Line::from(input_spans(&form.title, title_focused, text, cursor)),
        Line::from(""),
        Line::from(field_label("Description", desc_focused)),
        Line::from(input_spans(&form.description, desc_focused, text, cursor)),
        Line::from(""),
        Line::from(Span::styled("Enter next/save  Esc cancel", label)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(pane_block(app, " Edit task ", true)),
        area,
    );
}

// ---------------------------------------------------------------------------
// Logs tab
// ---------------------------------------------------------------------------

fn render_logs_tab(frame: &mut Frame, app: &App, area: Rect) {
    let open = app
        .session
        .selected_log()
        .filter(|_| app.session.log_mode() == LogDetailMode::Readonly);

    let Some(log) = open else {
        render_log_list(frame, app, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);
    render_log_list(frame, app, chunks[0]);

    let pager_focused = app.session.log_focus() == LogFocus::Pager;
    let title = format!(
        " {} \u{00B7} {} ",
        log.display_title(),
        log.created_at.format(TIME_FMT)
    );
    let mut lines = markdown_lines(&log.description, &app.theme);
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Empty log.",
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((app.pager_scroll, 0))
            .block(pane_block(app, &title, pager_focused)),
        chunks[1],
    );
}

fn render_log_list(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let logs = app.session.logs();
    if logs.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                " No logs yet. Press n to write one.",
                Style::default().fg(app.theme.dim).bg(bg),
            )),
            area,
        );
        return;
    }

    let width = area.width as usize;
    let list_focused = app.session.log_focus() == LogFocus::List;
    let lines: Vec<Line> = logs
        .iter()
        .enumerate()
        .map(|(i, log)| {
            let selected = i == app.session.log_cursor();
            let row_bg = if selected && list_focused {
                app.theme.selection_bg
            } else {
                bg
            };
            let style = Style::default()
                .fg(if selected {
                    app.theme.text_bright
                } else {
                    app.theme.text
                })
                .bg(row_bg);
            let mut spans = vec![
                Span::styled(
                    if selected { "\u{25B8}" } else { " " },
                    style.fg(app.theme.highlight),
                ),
                Span::styled("\u{2022} ", style.fg(app.theme.dim)),
                Span::styled(
                    truncate_to_width(&log.display_title(), width.saturating_sub(4)),
                    style,
                ),
            ];
            let used = super::helpers::spans_width(&spans);
            if used < width {
                spans.push(Span::styled(" ".repeat(width - used), style));
            }
            Line::from(spans)
        })
        .collect();

    let height = area.height as usize;
    let scroll = app
        .session
        .log_cursor()
        .saturating_sub(height.saturating_sub(1));
    frame.render_widget(
        Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .style(Style::default().bg(bg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn render(app: &App) -> String {
        render_to_string(TERM_W, 12, |frame, area| {
            render_detail_view(frame, app, area);
        })
    }

    #[test]
    fn details_tab_shows_fields() {
        let app = app_in_project(&[], &[]);
        let output = render(&app);
        assert!(output.contains(" Status    \u{25D0} In Progress"));
        assert!(output.contains(" Summary   Vegetable beds"));
        assert!(output.contains(" Raised beds along the fence."));
    }

    #[test]
    fn tasks_tab_collapsed_completed_section() {
        let mut app = app_in_project(&[("Dig", false), ("Plant", true), ("Water", false)], &[]);
        app.session.set_tab(DetailTab::Tasks);
        let output = render(&app);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "\u{25B8}[ ] Dig");
        assert_eq!(lines[1], " [ ] Water");
        assert_eq!(lines[2], " \u{25B6} Completed (1)");
        assert!(!output.contains("Plant"));
    }

    #[test]
    fn tasks_tab_expanded_completed_section() {
        let mut app = app_in_project(&[("Dig", false), ("Plant", true)], &[]);
        app.session.set_tab(DetailTab::Tasks);
        app.session.toggle_show_completed();
        app.session.move_task_cursor_down();
        let output = render(&app);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[1], " \u{25BC} Completed (1)");
        assert_eq!(lines[2], "\u{25B8}[x] Plant");
    }

    #[test]
    fn readonly_task_pane_shows_completion() {
        let mut app = app_in_project(&[("Plant", true)], &[]);
        app.session.set_tab(DetailTab::Tasks);
        app.session.toggle_show_completed();
        app.session.select_task(0);
        let output = render(&app);
        assert!(output.contains("Status: Completed"));
        assert!(output.contains("Completed at: 2025-05-14 09:30"));
    }

    #[test]
    fn readonly_task_pane_pending() {
        let mut app = app_in_project(&[("Dig", false)], &[]);
        app.session.set_tab(DetailTab::Tasks);
        app.session.select_task(0);
        let output = render(&app);
        assert!(output.contains("Status: Pending"));
        assert!(!output.contains("Completed at"));
    }

    #[test]
    fn empty_tasks_hint() {
        let mut app = app_in_project(&[], &[]);
        app.session.set_tab(DetailTab::Tasks);
        assert!(render(&app).contains("No tasks yet. Press n to add one."));
    }

    #[test]
    fn logs_tab_list_and_pager() {
        let mut app = app_in_project(&[], &[("Day 1", "# Morning\n- weeded")]);
        app.session.set_tab(DetailTab::Logs);
        let output = render(&app);
        assert!(output.contains("\u{25B8}\u{2022} Day 1"));

        app.session.select_log(0);
        let output = render(&app);
        assert!(output.contains("Morning"));
        assert!(output.contains("\u{2022} weeded"));
    }
}
