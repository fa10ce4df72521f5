use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::session::{DetailTab, ViewState};
use crate::tui::app::App;

use super::helpers::centered_rect;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    let mut section = |title: &'static str, bindings: &[(&'static str, &'static str)]| {
        lines.push(Line::from(Span::styled(title, header_style)));
        for &(key, desc) in bindings {
            add_binding(&mut lines, key, desc, key_style, desc_style);
        }
        lines.push(Line::from(""));
    };

    if app.session.view() == ViewState::List || app.session.selected_project().is_none() {
        section(
            " Projects",
            &[
                (" \u{2191}\u{2193}/jk", "Move cursor"),
                (" g/G", "Jump to top/bottom"),
                (" Enter", "Open project"),
                (" n", "New project"),
                (" d", "Delete project"),
                (" /", "Filter (regex)"),
                (" Esc", "Clear filter"),
            ],
        );
    } else {
        section(
            " Project",
            &[
                (" 1/2/3", "Details / Tasks / Logs"),
                (" \u{2190}\u{2192}", "Previous / next tab"),
                (" u", "Edit project"),
                (" t", "New task"),
                (" l", "New log"),
                (" Esc/b", "Close pane / back to list"),
            ],
        );
        match app.session.tab() {
            DetailTab::Tasks => section(
                " Tasks",
                &[
                    (" \u{2191}\u{2193}/jk", "Move cursor"),
                    (" Space", "Toggle completed"),
                    (" c", "Show/hide completed"),
                    (" n", "Quick add"),
                    (" Enter", "View task"),
                    (" e", "Edit task"),
                    (" d", "Delete task"),
                ],
            ),
            DetailTab::Logs => section(
                " Logs",
                &[
                    (" \u{2191}\u{2193}/jk", "Move cursor / scroll"),
                    (" Enter", "Open log"),
                    (" Tab", "Focus list / pager"),
                    (" n", "New log (full editor)"),
                    (" e", "Edit log"),
                    (" d", "Delete log"),
                ],
            ),
            DetailTab::Details => {}
        }
    }

    section(
        " General",
        &[(" ?", "Toggle help"), (" q", "Quit"), (" ctrl+c", "Quit")],
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_focused).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
