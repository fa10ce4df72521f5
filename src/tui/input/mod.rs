mod detail;
mod dialog;
mod form;
mod list;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::SqliteStore;
use crate::session::{
    DetailTab, LogDetailMode, LogFocus, SessionController, Signal, TaskDetailMode, ViewState,
};

use super::app::App;

/// One step of key handling. A handler either consumes the key, yielding
/// the command's signal, or passes it to the next handler in line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handler {
    Dialog,
    Interrupt,
    Help,
    ListFilter,
    List,
    ProjectForm,
    TaskForm,
    LogForm,
    QuickAdd,
    TaskEdit,
    ReadonlyBack,
    DetailShared,
    TabNavigation,
    TasksTab,
    LogFocusSwitch,
    LogsList,
    LogPager,
}

impl Handler {
    fn handle(self, app: &mut App, key: &KeyEvent) -> Option<Signal> {
        match self {
            Handler::Dialog => Some(dialog::handle_dialog(app, key)),
            Handler::Interrupt => is_interrupt(key).then(|| app.session.quit()),
            Handler::Help => handle_help(app, key),
            Handler::ListFilter => list::handle_filter_input(app, key),
            Handler::List => Some(list::handle_list(app, key)),
            Handler::ProjectForm => Some(form::handle_project_form(app, key)),
            Handler::TaskForm => Some(form::handle_task_form(app, key)),
            Handler::LogForm => Some(form::handle_log_form(app, key)),
            Handler::QuickAdd => form::handle_quick_add(app, key),
            Handler::TaskEdit => form::handle_task_edit(app, key),
            Handler::ReadonlyBack => detail::handle_readonly_back(app, key),
            Handler::DetailShared => detail::handle_shared(app, key),
            Handler::TabNavigation => detail::handle_tab_navigation(app, key),
            Handler::TasksTab => Some(detail::handle_tasks_tab(app, key)),
            Handler::LogFocusSwitch => detail::handle_log_focus_switch(app, key),
            Handler::LogsList => Some(detail::handle_logs_list(app, key)),
            Handler::LogPager => Some(detail::handle_pager(app, key)),
        }
    }
}

/// The parts of session state that decide which handlers see a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeyContext {
    view: ViewState,
    tab: DetailTab,
    task_mode: TaskDetailMode,
    log_mode: LogDetailMode,
    log_focus: LogFocus,
}

impl KeyContext {
    fn of(session: &SessionController<SqliteStore>) -> Self {
        KeyContext {
            view: session.view(),
            tab: session.tab(),
            task_mode: session.task_mode(),
            log_mode: session.log_mode(),
            log_focus: session.log_focus(),
        }
    }
}

/// Handlers for a context, in the order they are tried.
///
/// An open dialog takes every key. Elsewhere Ctrl+C quits and the help
/// overlay swallows keys while shown; inside a project the inline inputs
/// come next, then a read-only pane's back-navigation, then the bindings
/// shared by all tabs, and the tab's own bindings last.
fn handlers_for(ctx: KeyContext) -> &'static [Handler] {
    use Handler::*;

    match ctx.view {
        ViewState::DeleteProjectConfirm
        | ViewState::DeleteTaskConfirm
        | ViewState::DeleteLogConfirm => &[Dialog],
        ViewState::List => &[Interrupt, Help, ListFilter, List],
        ViewState::CreateProject | ViewState::UpdateProject => &[Interrupt, ProjectForm],
        ViewState::CreateTask => &[Interrupt, TaskForm],
        ViewState::CreateLog | ViewState::UpdateLog | ViewState::FullscreenLogEditor => {
            &[Interrupt, LogForm]
        }
        ViewState::ProjectDetail => match (ctx.tab, ctx.task_mode, ctx.log_mode, ctx.log_focus) {
            (DetailTab::Details, ..) => &[Interrupt, Help, DetailShared, TabNavigation],
            (DetailTab::Tasks, TaskDetailMode::Edit, ..) => &[
                Interrupt,
                Help,
                QuickAdd,
                TaskEdit,
                DetailShared,
                TabNavigation,
                TasksTab,
            ],
            (DetailTab::Tasks, TaskDetailMode::Readonly, ..) => &[
                Interrupt,
                Help,
                QuickAdd,
                ReadonlyBack,
                DetailShared,
                TabNavigation,
                TasksTab,
            ],
            (DetailTab::Tasks, ..) => &[
                Interrupt,
                Help,
                QuickAdd,
                DetailShared,
                TabNavigation,
                TasksTab,
            ],
            // Left/Right belong to the pager while it has focus
            (DetailTab::Logs, _, LogDetailMode::Readonly, LogFocus::Pager) => &[
                Interrupt,
                Help,
                ReadonlyBack,
                DetailShared,
                LogFocusSwitch,
                LogPager,
            ],
            (DetailTab::Logs, _, _, LogFocus::Pager) => {
                &[Interrupt, Help, DetailShared, LogFocusSwitch, LogPager]
            }
            (DetailTab::Logs, _, LogDetailMode::Readonly, LogFocus::List) => &[
                Interrupt,
                Help,
                ReadonlyBack,
                DetailShared,
                TabNavigation,
                LogFocusSwitch,
                LogsList,
            ],
            (DetailTab::Logs, ..) => &[
                Interrupt,
                Help,
                DetailShared,
                TabNavigation,
                LogFocusSwitch,
                LogsList,
            ],
        },
    }
}

/// Handle a key event for whatever currently has focus
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    // An error stays on screen until the next key press
    app.session.clear_error();

    let ctx = KeyContext::of(&app.session);
    let signal = handlers_for(ctx)
        .iter()
        .find_map(|handler| handler.handle(app, &key))
        .unwrap_or(Signal::None);
    app.apply_signal(signal);
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

fn handle_help(app: &mut App, key: &KeyEvent) -> Option<Signal> {
    if !app.show_help {
        return None;
    }
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
        app.show_help = false;
    }
    Some(Signal::None)
}

/// Plain or shifted character, the way most bindings are matched
fn plain_char(key: &KeyEvent) -> Option<char> {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => Some(c),
        _ => None,
    }
}
