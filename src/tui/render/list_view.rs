use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::Project;
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::push_highlighted_spans;

/// Project list on the left, preview of the highlighted project on the right
pub fn render_list_view(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_project_list(frame, app, chunks[0]);
    let visible = app.visible_projects();
    if let Some((_, project)) = visible.get(app.list_cursor) {
        render_preview(frame, app, project, chunks[1]);
    }
}

fn render_project_list(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let visible = app.visible_projects();
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if visible.is_empty() {
        let msg = if app.session.projects().is_empty() {
            " No projects yet. Press n to create one."
        } else {
            " No projects match the filter."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(msg, Style::default().fg(app.theme.dim).bg(bg))),
            inner,
        );
        return;
    }

    let height = inner.height as usize;
    // Keep the cursor on screen
    let scroll = app.list_cursor.saturating_sub(height.saturating_sub(1));
    let re = app.filter_re();
    let width = inner.width as usize;

    let lines: Vec<Line> = visible
        .iter()
        .enumerate()
        .skip(scroll)
        .take(height)
        .map(|(i, (_, project))| {
            let selected = i == app.list_cursor;
            let row_bg = if selected { app.theme.selection_bg } else { bg };
            let base = Style::default()
                .fg(if selected {
                    app.theme.text_bright
                } else {
                    app.theme.text
                })
                .bg(row_bg);
            let match_style = base.fg(app.theme.highlight).add_modifier(Modifier::BOLD);

            let mut spans = vec![
                Span::styled(if selected { "\u{25B8}" } else { " " }, base.fg(app.theme.highlight)),
                Span::styled(
                    format!("{} ", project.status.icon()),
                    base.fg(app.theme.status_color(project.status)),
                ),
            ];
            let name = truncate_to_width(&project.name, width.saturating_sub(4));
            push_highlighted_spans(&mut spans, &name, base, match_style, re.as_ref());
            let used = super::helpers::spans_width(&spans);
            if used < width {
                spans.push(Span::styled(" ".repeat(width - used), base));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}

fn render_preview(frame: &mut Frame, app: &App, project: &Project, area: Rect) {
    let bg = app.theme.background;
    let label = Style::default().fg(app.theme.dim).bg(bg);
    let text = Style::default().fg(app.theme.text).bg(bg);
    let title = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(project.name.as_str(), title)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Status   ", label),
            Span::styled(
                format!("{} {}", project.status.icon(), project.status.label()),
                Style::default()
                    .fg(app.theme.status_color(project.status))
                    .bg(bg),
            ),
        ]),
        Line::from(vec![
            Span::styled("Updated  ", label),
            Span::styled(project.updated_at.format("%Y-%m-%d %H:%M").to_string(), text),
        ]),
    ];
    if !project.summary.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(project.summary.as_str(), text)));
    }
    if !project.description.is_empty() {
        lines.push(Line::from(""));
        for l in project.description.lines() {
            lines.push(Line::from(Span::styled(l, label)));
        }
    }

    let inner = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(bg)),
        inner,
    );
}
