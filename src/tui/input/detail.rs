use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::SqliteStore;
use crate::model::MAX_TITLE_CHARS;
use crate::session::{DetailTab, LogDetailMode, SessionController, Signal};
use crate::tui::app::App;
use crate::tui::editor::LineInput;
use crate::tui::forms::{LogForm, ProjectForm, TaskForm};

use super::plain_char;

/// Esc and `b` close a read-only task or log pane before anything else
pub(super) fn handle_readonly_back(app: &mut App, key: &KeyEvent) -> Option<Signal> {
    match (plain_char(key), key.code) {
        (Some('b'), _) | (_, KeyCode::Esc) => Some(back(app)),
        _ => None,
    }
}

/// Bindings shared by all tabs. Returns None when the key is not one of them.
pub(super) fn handle_shared(app: &mut App, key: &KeyEvent) -> Option<Signal> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('h') => Some(switch_tab(app, |s| s.prev_tab())),
            KeyCode::Char('l') => Some(switch_tab(app, |s| s.next_tab())),
            _ => None,
        };
    }

    if let Some(c) = plain_char(key) {
        let signal = match c {
            '1' => switch_tab(app, |s| s.set_tab(DetailTab::Details)),
            '2' => switch_tab(app, |s| s.set_tab(DetailTab::Tasks)),
            '3' => switch_tab(app, |s| s.set_tab(DetailTab::Logs)),
            'u' => {
                if let Some(project) = app.session.selected_project() {
                    app.project_form = ProjectForm::for_project(project);
                }
                app.session.go_to_update_view()
            }
            't' => {
                app.task_form = TaskForm::new();
                app.session.go_to_create_task_view()
            }
            'l' => {
                app.log_form = LogForm::new();
                app.session.go_to_create_log_view()
            }
            'b' => back(app),
            'q' => app.session.quit(),
            '?' => {
                app.show_help = true;
                Signal::None
            }
            _ => return None,
        };
        return Some(signal);
    }

    match key.code {
        KeyCode::Esc => Some(back(app)),
        _ => None,
    }
}

pub(super) fn handle_tab_navigation(app: &mut App, key: &KeyEvent) -> Option<Signal> {
    match key.code {
        KeyCode::Left => Some(switch_tab(app, |s| s.prev_tab())),
        KeyCode::Right => Some(switch_tab(app, |s| s.next_tab())),
        _ => None,
    }
}

fn switch_tab<F>(app: &mut App, f: F) -> Signal
where
    F: FnOnce(&mut SessionController<SqliteStore>),
{
    f(&mut app.session);
    app.task_edit = None;
    app.quick_add = None;
    app.pager_scroll = 0;
    Signal::None
}

fn back(app: &mut App) -> Signal {
    app.task_edit = None;
    app.pager_scroll = 0;
    let signal = app.session.back();
    if app.session.selected_project().is_none() {
        app.clamp_list_cursor();
    }
    signal
}

pub(super) fn handle_tasks_tab(app: &mut App, key: &KeyEvent) -> Signal {
    if let Some(c) = plain_char(key) {
        return match c {
            'j' => {
                app.session.move_task_cursor_down();
                Signal::None
            }
            'k' => {
                app.session.move_task_cursor_up();
                Signal::None
            }
            ' ' => app.session.toggle_task_under_cursor(),
            'c' => {
                app.session.toggle_show_completed();
                Signal::None
            }
            'n' => {
                app.quick_add = Some(LineInput::with_limit(MAX_TITLE_CHARS));
                Signal::None
            }
            'e' => {
                let signal = app.session.edit_task(app.session.task_cursor());
                if let Some(task) = app.session.selected_task() {
                    app.task_edit = Some(TaskForm::for_task(task));
                }
                signal
            }
            'd' => match app.session.task_under_cursor().map(|t| t.id) {
                Some(id) => app.session.open_delete_task_dialog(id),
                None => Signal::None,
            },
            _ => Signal::None,
        };
    }
    match key.code {
        KeyCode::Down => {
            app.session.move_task_cursor_down();
            Signal::None
        }
        KeyCode::Up => {
            app.session.move_task_cursor_up();
            Signal::None
        }
        KeyCode::Enter => app.session.select_task(app.session.task_cursor()),
        _ => Signal::None,
    }
}

/// Tab moves focus between the log list and the pager
pub(super) fn handle_log_focus_switch(app: &mut App, key: &KeyEvent) -> Option<Signal> {
    if key.code != KeyCode::Tab {
        return None;
    }
    app.session.toggle_log_focus();
    Some(Signal::None)
}

pub(super) fn handle_logs_list(app: &mut App, key: &KeyEvent) -> Signal {
    if let Some(c) = plain_char(key) {
        return match c {
            'j' => {
                app.session.move_log_cursor_down();
                Signal::None
            }
            'k' => {
                app.session.move_log_cursor_up();
                Signal::None
            }
            'n' => {
                app.log_form = LogForm::new();
                app.session.go_to_log_editor()
            }
            'e' => edit_log(app),
            'd' => match app.session.log_under_cursor().map(|l| l.id) {
                Some(id) => app.session.open_delete_log_dialog(id),
                None => Signal::None,
            },
            _ => Signal::None,
        };
    }
    match key.code {
        KeyCode::Down => {
            app.session.move_log_cursor_down();
            Signal::None
        }
        KeyCode::Up => {
            app.session.move_log_cursor_up();
            Signal::None
        }
        KeyCode::Enter => {
            app.pager_scroll = 0;
            app.session.select_log(app.session.log_cursor())
        }
        _ => Signal::None,
    }
}

/// Open the log under the cursor (if not already open) in the editor
fn edit_log(app: &mut App) -> Signal {
    let open_id = app.session.selected_log().map(|l| l.id);
    let cursor_id = app.session.log_under_cursor().map(|l| l.id);
    if cursor_id.is_some() && open_id != cursor_id {
        let signal = app.session.select_log(app.session.log_cursor());
        if signal == Signal::ShowError {
            return signal;
        }
    }
    if let Some(log) = app.session.selected_log() {
        app.log_form = LogForm::for_log(log);
    }
    app.session.go_to_update_log_view()
}

pub(super) fn handle_pager(app: &mut App, key: &KeyEvent) -> Signal {
    match (plain_char(key), key.code) {
        (Some('j'), _) | (_, KeyCode::Down) => app.pager_scroll = app.pager_scroll.saturating_add(1),
        (Some('k'), _) | (_, KeyCode::Up) => app.pager_scroll = app.pager_scroll.saturating_sub(1),
        (Some('g'), _) | (_, KeyCode::Home) => app.pager_scroll = 0,
        (_, KeyCode::PageDown) => app.pager_scroll = app.pager_scroll.saturating_add(10),
        (_, KeyCode::PageUp) => app.pager_scroll = app.pager_scroll.saturating_sub(10),
        _ => {}
    }
    if app.session.log_mode() != LogDetailMode::Readonly {
        app.pager_scroll = 0;
    }
    Signal::None
}
