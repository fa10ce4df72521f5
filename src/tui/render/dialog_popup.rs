use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::session::{DeleteAction, DialogChoice};
use crate::tui::app::App;

use super::helpers::centered_rect_fixed;

/// Name of the record a pending deletion refers to
fn subject(app: &App, action: &DeleteAction) -> String {
    let found = match *action {
        DeleteAction::Project { id } => app
            .session
            .projects()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone()),
        DeleteAction::Task { id } => app
            .session
            .tasks()
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.title.clone()),
        DeleteAction::Log { id } => app
            .session
            .logs()
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.display_title()),
    };
    found.unwrap_or_default()
}

/// Render the delete confirmation popup
pub fn render_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let Some(dialog) = app.session.dialog() else {
        return;
    };

    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.red)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let bright_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let button = |label: &'static str, active: bool, danger: bool| {
        let style = if active {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(if danger { app.theme.red } else { app.theme.selection_bg })
                .add_modifier(Modifier::BOLD)
        } else {
            text_style
        };
        Span::styled(label, style)
    };

    let confirm = dialog.choice() == DialogChoice::Confirm;
    let name = subject(app, dialog.action());
    let lines = vec![
        Line::from(Span::styled(dialog.kind().title(), header_style)),
        Line::from(""),
        Line::from(Span::styled("Are you sure you want to delete", text_style)),
        Line::from(vec![
            Span::styled(format!("\"{}\"", name), bright_style),
            Span::styled("?", text_style),
        ]),
        Line::from(""),
        Line::from(vec![
            button("[ Cancel ]", !confirm, false),
            Span::styled("  ", text_style),
            button("[ Delete ]", confirm, true),
        ]),
        Line::from(""),
        Line::from(Span::styled("\u{2190}\u{2192} choose  Enter  y/n", dim_style)),
    ];

    let popup_w: u16 = 46;
    let popup_h = lines.len() as u16 + 2;
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}
