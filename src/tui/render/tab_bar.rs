use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::session::DetailTab;
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// Render the header: project tabs when a project is open, otherwise the
/// list title. A separator line sits below.
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let bg_style = Style::default().bg(app.theme.background);
    let mut spans: Vec<Span> = vec![
        Span::styled(" ", bg_style),
        Span::styled("\u{25B6}", bg_style.fg(app.theme.highlight)),
        Span::styled(" ", bg_style),
    ];
    let mut sep_cols = Vec::new();
    let sep = Span::styled("\u{2502}", bg_style.fg(app.theme.dim));
    let width = |spans: &[Span]| -> usize { spans.iter().map(|s| s.content.chars().count()).sum() };

    match app.session.selected_project() {
        None => {
            let count = app.session.projects().len();
            spans.push(Span::styled(
                format!(" Projects ({}) ", count),
                tab_style(app, true),
            ));
            if let Some(filter) = &app.filter {
                sep_cols.push(width(&spans));
                spans.push(sep);
                spans.push(Span::styled(
                    format!(" /{} ", filter),
                    bg_style.fg(app.theme.dim),
                ));
            }
        }
        Some(project) => {
            let name = truncate_to_width(&project.name, 30);
            spans.push(Span::styled(
                format!(" {} ", name),
                bg_style
                    .fg(app.theme.text_bright)
                    .add_modifier(Modifier::BOLD),
            ));
            for tab in DetailTab::ALL {
                sep_cols.push(width(&spans));
                spans.push(sep.clone());
                let label = match tab {
                    DetailTab::Tasks => {
                        let pending = app.session.visual_tasks().pending().len();
                        format!(" {} ({}) ", tab.label(), pending)
                    }
                    DetailTab::Logs => format!(" {} ({}) ", tab.label(), app.session.logs().len()),
                    DetailTab::Details => format!(" {} ", tab.label()),
                };
                spans.push(Span::styled(label, tab_style(app, app.session.tab() == tab)));
            }
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
    sep_cols
}

fn tab_style(app: &App, current: bool) -> Style {
    if current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(app.theme.background)
    }
}

/// Separator line with `┴` under each tab separator
fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let line: String = (0..area.width as usize)
        .map(|col| {
            if sep_cols.contains(&col) {
                '\u{2534}'
            } else {
                '\u{2500}'
            }
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Span::styled(
            line,
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        )),
        area,
    );
}
