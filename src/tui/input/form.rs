use crossterm::event::{KeyCode, KeyEvent};

use crate::model::{FormOutcome, TaskFormData};
use crate::session::{Signal, ViewState};
use crate::tui::app::App;

pub(super) fn handle_project_form(app: &mut App, key: &KeyEvent) -> Signal {
    match app.project_form.handle_key(*key) {
        None => Signal::None,
        Some(FormOutcome::Aborted) => app.session.cancel_form(),
        Some(FormOutcome::Submitted(data)) => match app.session.view() {
            ViewState::UpdateProject => app.session.update_project(&data),
            _ => app.session.create_project(&data),
        },
    }
}

pub(super) fn handle_task_form(app: &mut App, key: &KeyEvent) -> Signal {
    match app.task_form.handle_key(*key) {
        None => Signal::None,
        Some(FormOutcome::Aborted) => app.session.cancel_form(),
        Some(FormOutcome::Submitted(data)) => app.session.create_task(&data),
    }
}

pub(super) fn handle_log_form(app: &mut App, key: &KeyEvent) -> Signal {
    match app.log_form.handle_key(*key) {
        None => Signal::None,
        Some(FormOutcome::Aborted) => app.session.cancel_form(),
        Some(FormOutcome::Submitted(data)) => match app.session.view() {
            ViewState::UpdateLog => app.session.update_log(&data),
            _ => app.session.create_log(&data),
        },
    }
}

/// The edit pane of the tasks tab. Saving keeps the task's completion state.
/// Takes every key while the pane is open.
pub(super) fn handle_task_edit(app: &mut App, key: &KeyEvent) -> Option<Signal> {
    let form = app.task_edit.as_mut()?;
    let signal = match form.handle_key(*key) {
        None => Signal::None,
        Some(FormOutcome::Aborted) => {
            app.task_edit = None;
            app.session.cancel_task_edit();
            Signal::None
        }
        Some(FormOutcome::Submitted(data)) => {
            let Some(id) = app.session.selected_task().map(|t| t.id) else {
                app.task_edit = None;
                return Some(Signal::None);
            };
            let signal = app.session.update_task(id, &data);
            if signal != Signal::ShowError {
                app.task_edit = None;
            }
            signal
        }
    };
    Some(signal)
}

/// Title-only task input. Stays open after a failed create.
pub(super) fn handle_quick_add(app: &mut App, key: &KeyEvent) -> Option<Signal> {
    let input = app.quick_add.as_mut()?;
    let signal = match key.code {
        KeyCode::Esc => {
            app.quick_add = None;
            Signal::None
        }
        KeyCode::Enter => {
            let form = TaskFormData {
                title: input.text().trim().to_string(),
                description: String::new(),
            };
            let signal = app.session.create_task(&form);
            if signal != Signal::ShowError {
                app.quick_add = None;
            }
            signal
        }
        _ => {
            input.handle_key(*key);
            Signal::None
        }
    };
    Some(signal)
}
