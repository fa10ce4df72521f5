pub mod detail_view;
pub mod dialog_popup;
pub mod form_view;
pub mod help_overlay;
mod helpers;
pub mod list_view;
pub mod markdown;
pub mod status_row;
pub mod tab_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Clear};
use regex::Regex;

use crate::session::ViewState;

use super::app::App;

/// Main render function: the base screen, then any form, dialog or overlay
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    let view = app.session.view();
    let fullscreen = matches!(view, ViewState::FullscreenLogEditor | ViewState::UpdateLog);
    if fullscreen {
        frame.render_widget(Clear, chunks[1]);
        form_view::render_log_form(frame, app, chunks[1], true);
    } else if app.session.selected_project().is_some() {
        detail_view::render_detail_view(frame, app, chunks[1]);
    } else {
        list_view::render_list_view(frame, app, chunks[1]);
    }

    match view {
        ViewState::CreateProject | ViewState::UpdateProject => {
            form_view::render_project_form(frame, app, chunks[1])
        }
        ViewState::CreateTask => form_view::render_task_form(frame, app, chunks[1]),
        ViewState::CreateLog => form_view::render_log_form(frame, app, chunks[1], false),
        _ => {}
    }

    dialog_popup::render_dialog(frame, app, area);

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let Some(re) = search_re else {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}
