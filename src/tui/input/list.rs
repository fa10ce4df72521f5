use crossterm::event::{KeyCode, KeyEvent};

use crate::session::Signal;
use crate::tui::app::App;
use crate::tui::editor::LineInput;
use crate::tui::forms::ProjectForm;

use super::plain_char;

pub(super) fn handle_list(app: &mut App, key: &KeyEvent) -> Signal {
    if let Some(c) = plain_char(key) {
        return match c {
            'j' => move_cursor(app, 1),
            'k' => move_cursor(app, -1),
            'g' => {
                app.list_cursor = 0;
                Signal::None
            }
            'G' => {
                app.list_cursor = app.visible_projects().len().saturating_sub(1);
                Signal::None
            }
            'n' => {
                app.project_form = ProjectForm::new();
                app.session.go_to_create_view()
            }
            'd' => match app.project_index_under_cursor() {
                Some(idx) => app.session.open_delete_project_dialog(idx),
                None => Signal::None,
            },
            '/' => {
                let mut input = LineInput::new();
                if let Some(f) = &app.filter {
                    input.set_text(f);
                }
                app.filter_input = Some(input);
                Signal::None
            }
            '?' => {
                app.show_help = true;
                Signal::None
            }
            'q' => app.session.quit(),
            _ => Signal::None,
        };
    }

    match key.code {
        KeyCode::Down => move_cursor(app, 1),
        KeyCode::Up => move_cursor(app, -1),
        KeyCode::Enter => match app.project_index_under_cursor() {
            Some(idx) => {
                app.pager_scroll = 0;
                app.session.select_project(idx)
            }
            None => Signal::None,
        },
        KeyCode::Esc => {
            app.filter = None;
            Signal::None
        }
        _ => Signal::None,
    }
}

fn move_cursor(app: &mut App, delta: isize) -> Signal {
    let len = app.visible_projects().len();
    if len == 0 {
        app.list_cursor = 0;
        return Signal::None;
    }
    app.list_cursor = app.list_cursor.saturating_add_signed(delta).min(len - 1);
    Signal::None
}

/// Typing a filter narrows the list live; Enter keeps it, Esc drops it.
/// Takes every key while the filter input is open.
pub(super) fn handle_filter_input(app: &mut App, key: &KeyEvent) -> Option<Signal> {
    if app.filter_input.is_none() {
        return None;
    }
    match key.code {
        KeyCode::Enter => {
            if let Some(input) = app.filter_input.take() {
                let text = input.text().trim().to_string();
                app.filter = (!text.is_empty()).then_some(text);
            }
        }
        KeyCode::Esc => {
            app.filter_input = None;
            app.filter = None;
        }
        _ => {
            if let Some(input) = &mut app.filter_input {
                input.handle_key(*key);
            }
        }
    }
    app.clamp_list_cursor();
    Some(Signal::None)
}
