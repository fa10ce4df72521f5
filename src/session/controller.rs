use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::dialog::{ConfirmDialog, DialogKey, DialogKind, DialogOutcome};
use super::error::SessionError;
use super::visual_index::{self, VisualTasks};
use crate::io::store::{EntityKind, EntityStore};
use crate::model::{
    Log, LogFormData, Project, ProjectFormData, TasksConfig, Task, TaskFormData, TaskUpdate,
};

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    List,
    ProjectDetail,
    CreateProject,
    UpdateProject,
    DeleteProjectConfirm,
    CreateTask,
    DeleteTaskConfirm,
    CreateLog,
    UpdateLog,
    DeleteLogConfirm,
    FullscreenLogEditor,
}

/// Tabs of the project detail screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Details,
    Tasks,
    Logs,
}

impl DetailTab {
    pub const ALL: [DetailTab; 3] = [DetailTab::Details, DetailTab::Tasks, DetailTab::Logs];

    pub fn label(self) -> &'static str {
        match self {
            DetailTab::Details => "Details",
            DetailTab::Tasks => "Tasks",
            DetailTab::Logs => "Logs",
        }
    }

    fn index(self) -> usize {
        match self {
            DetailTab::Details => 0,
            DetailTab::Tasks => 1,
            DetailTab::Logs => 2,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What the tasks tab shows next to the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskDetailMode {
    #[default]
    None,
    Readonly,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogDetailMode {
    #[default]
    None,
    Readonly,
}

/// Which pane of the logs tab receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFocus {
    #[default]
    List,
    Pager,
}

/// Outcome of a session command; the caller must react to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    None,
    /// Re-fetch the project list
    RefreshProjectList,
    /// Re-fetch tasks and logs of the active project
    RefreshActiveProjectView,
    Quit,
    /// Surface [`SessionController::last_error`]
    ShowError,
}

/// Deletion bound to a confirmation dialog when it opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAction {
    Project { id: i64 },
    Task { id: i64 },
    Log { id: i64 },
}

/// Behaviour switches taken from the `[tasks]` config section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub show_completed: bool,
    pub step_back_on_complete: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions::from(&TasksConfig::default())
    }
}

impl From<&TasksConfig> for SessionOptions {
    fn from(cfg: &TasksConfig) -> Self {
        SessionOptions {
            show_completed: cfg.show_completed,
            step_back_on_complete: cfg.step_back_on_complete,
        }
    }
}

/// Owns navigation and selection state and turns user intents into store
/// calls plus a [`Signal`].
///
/// Invariants kept by every command:
/// - cached tasks and logs belong to the selected project
/// - the selected task/log ids are cleared whenever their list is reloaded
/// - the task cursor stays within the visible task range
pub struct SessionController<S> {
    store: S,
    options: SessionOptions,
    view: ViewState,
    tab: DetailTab,
    task_mode: TaskDetailMode,
    log_mode: LogDetailMode,
    log_focus: LogFocus,
    projects: Vec<Project>,
    selected_project: Option<Project>,
    tasks: Vec<Task>,
    logs: Vec<Log>,
    selected_task: Option<i64>,
    selected_log: Option<i64>,
    task_cursor: usize,
    log_cursor: usize,
    show_completed: bool,
    dialog: Option<ConfirmDialog<DeleteAction>>,
    /// View to restore when the dialog closes
    dialog_return: ViewState,
    last_error: Option<SessionError>,
}

impl<S: EntityStore> SessionController<S> {
    /// Start on the project list, loaded from the store.
    pub fn new(store: S, options: SessionOptions) -> Result<Self, SessionError> {
        let projects = store.list_projects()?;
        debug!(count = projects.len(), "session started");
        Ok(SessionController {
            store,
            options,
            view: ViewState::List,
            tab: DetailTab::Details,
            task_mode: TaskDetailMode::None,
            log_mode: LogDetailMode::None,
            log_focus: LogFocus::List,
            projects,
            selected_project: None,
            tasks: Vec::new(),
            logs: Vec::new(),
            selected_task: None,
            selected_log: None,
            task_cursor: 0,
            log_cursor: 0,
            show_completed: options.show_completed,
            dialog: None,
            dialog_return: ViewState::List,
            last_error: None,
        })
    }

    // -----------------------------------------------------------------------
    // Getters
    // -----------------------------------------------------------------------

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn tab(&self) -> DetailTab {
        self.tab
    }

    pub fn task_mode(&self) -> TaskDetailMode {
        self.task_mode
    }

    pub fn log_mode(&self) -> LogDetailMode {
        self.log_mode
    }

    pub fn log_focus(&self) -> LogFocus {
        self.log_focus
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected_project.as_ref()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let id = self.selected_task?;
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn selected_log(&self) -> Option<&Log> {
        let id = self.selected_log?;
        self.logs.iter().find(|l| l.id == id)
    }

    pub fn task_cursor(&self) -> usize {
        self.task_cursor
    }

    pub fn log_cursor(&self) -> usize {
        self.log_cursor
    }

    pub fn show_completed(&self) -> bool {
        self.show_completed
    }

    pub fn dialog(&self) -> Option<&ConfirmDialog<DeleteAction>> {
        self.dialog.as_ref()
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// The task list as displayed
    pub fn visual_tasks(&self) -> VisualTasks<'_> {
        VisualTasks::new(&self.tasks, self.show_completed)
    }

    pub fn task_under_cursor(&self) -> Option<&Task> {
        self.visual_tasks().task_at(self.task_cursor)
    }

    pub fn log_under_cursor(&self) -> Option<&Log> {
        self.logs.get(self.log_cursor)
    }

    // -----------------------------------------------------------------------
    // Signal plumbing
    // -----------------------------------------------------------------------

    fn finish(&mut self, result: Result<Signal, SessionError>) -> Signal {
        match result {
            Ok(signal) => {
                self.last_error = None;
                signal
            }
            Err(err) => {
                warn!(error = %err, kind = ?err.kind(), view = ?self.view, "command failed");
                self.last_error = Some(err);
                Signal::ShowError
            }
        }
    }

    fn set_view(&mut self, view: ViewState) {
        if self.view != view {
            debug!(from = ?self.view, to = ?view, "view change");
        }
        self.view = view;
    }

    fn require_project(&self) -> Result<&Project, SessionError> {
        self.selected_project
            .as_ref()
            .ok_or(SessionError::NoSelection(EntityKind::Project))
    }

    fn require_project_id(&self) -> Result<i64, SessionError> {
        self.require_project().map(|p| p.id)
    }

    fn cached_task(&self, task_id: i64) -> Result<&Task, SessionError> {
        self.tasks
            .iter()
            .find(|t| t.id == task_id)
            .ok_or(SessionError::NotFound(EntityKind::Task))
    }

    fn reset_detail_state(&mut self) {
        self.task_mode = TaskDetailMode::None;
        self.log_mode = LogDetailMode::None;
        self.log_focus = LogFocus::List;
        self.selected_task = None;
        self.selected_log = None;
    }

    fn clear_active_project(&mut self) {
        self.selected_project = None;
        self.tasks.clear();
        self.logs.clear();
        self.reset_detail_state();
        self.task_cursor = 0;
        self.log_cursor = 0;
    }

    fn reload_tasks(&mut self) -> Result<(), SessionError> {
        let project_id = self.require_project_id()?;
        self.tasks = self.store.list_tasks_for(project_id)?;
        self.selected_task = None;
        self.task_mode = TaskDetailMode::None;
        self.task_cursor = self.visual_tasks().clamp(self.task_cursor);
        Ok(())
    }

    fn reload_logs(&mut self) -> Result<(), SessionError> {
        let project_id = self.require_project_id()?;
        self.logs = self.store.list_logs_for(project_id)?;
        self.selected_log = None;
        self.log_mode = LogDetailMode::None;
        self.log_focus = LogFocus::List;
        self.log_cursor = self.log_cursor.min(self.logs.len().saturating_sub(1));
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Refresh
    // -----------------------------------------------------------------------

    /// Re-fetch the project list, keeping the active project's value current.
    pub fn refresh_projects(&mut self) -> Signal {
        let result = self.try_refresh_projects();
        self.finish(result)
    }

    fn try_refresh_projects(&mut self) -> Result<Signal, SessionError> {
        self.projects = self.store.list_projects()?;
        if let Some(active) = &self.selected_project {
            let current = self.projects.iter().find(|p| p.id == active.id).cloned();
            match current {
                Some(p) => self.selected_project = Some(p),
                None => self.clear_active_project(),
            }
        }
        Ok(Signal::None)
    }

    /// Re-fetch tasks and logs of the active project.
    pub fn refresh_active_project(&mut self) -> Signal {
        let result = self
            .reload_tasks()
            .and_then(|_| self.reload_logs())
            .map(|_| Signal::None);
        self.finish(result)
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    /// Open the project at `index` of [`Self::projects`].
    pub fn select_project(&mut self, index: usize) -> Signal {
        let result = self.try_select_project(index);
        self.finish(result)
    }

    fn try_select_project(&mut self, index: usize) -> Result<Signal, SessionError> {
        let project = self
            .projects
            .get(index)
            .cloned()
            .ok_or(SessionError::InvalidIndex(EntityKind::Project))?;
        // Fetch everything before touching state so a failure leaves the
        // previous selection intact.
        let tasks = self.store.list_tasks_for(project.id)?;
        let logs = self.store.list_logs_for(project.id)?;

        debug!(project_id = project.id, "project selected");
        self.clear_active_project();
        self.selected_project = Some(project);
        self.tasks = tasks;
        self.logs = logs;
        self.tab = DetailTab::Details;
        self.set_view(ViewState::ProjectDetail);
        Ok(Signal::None)
    }

    pub fn create_project(&mut self, form: &ProjectFormData) -> Signal {
        let result = self
            .store
            .create_project(form)
            .map_err(SessionError::from)
            .map(|_| {
                self.set_view(ViewState::List);
                Signal::RefreshProjectList
            });
        self.finish(result)
    }

    pub fn update_project(&mut self, form: &ProjectFormData) -> Signal {
        let result = self.try_update_project(form);
        self.finish(result)
    }

    fn try_update_project(&mut self, form: &ProjectFormData) -> Result<Signal, SessionError> {
        let id = self.require_project_id()?;
        let updated = self.store.update_project(id, form)?;
        self.selected_project = Some(updated);
        self.set_view(ViewState::ProjectDetail);
        Ok(Signal::RefreshProjectList)
    }

    /// Delete the project at `index` of [`Self::projects`].
    pub fn delete_project(&mut self, index: usize) -> Signal {
        let result = self
            .projects
            .get(index)
            .map(|p| p.id)
            .ok_or(SessionError::InvalidIndex(EntityKind::Project))
            .and_then(|id| self.delete_project_by_id(id));
        self.finish(result)
    }

    fn delete_project_by_id(&mut self, id: i64) -> Result<Signal, SessionError> {
        self.store.delete_project(id)?;
        if self.selected_project.as_ref().is_some_and(|p| p.id == id) {
            self.clear_active_project();
        }
        self.set_view(ViewState::List);
        Ok(Signal::RefreshProjectList)
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    pub fn create_task(&mut self, form: &TaskFormData) -> Signal {
        let result = self.try_create_task(form);
        self.finish(result)
    }

    fn try_create_task(&mut self, form: &TaskFormData) -> Result<Signal, SessionError> {
        let project_id = self.require_project_id()?;
        self.store.create_task(project_id, form)?;
        self.set_view(ViewState::ProjectDetail);
        Ok(Signal::RefreshActiveProjectView)
    }

    /// Replace a task's title and description, keeping its completion state.
    pub fn update_task(&mut self, task_id: i64, form: &TaskFormData) -> Signal {
        let result = self.try_update_task(task_id, form);
        self.finish(result)
    }

    fn try_update_task(&mut self, task_id: i64, form: &TaskFormData) -> Result<Signal, SessionError> {
        let task = self.cached_task(task_id)?;
        let update = TaskUpdate {
            title: form.title.clone(),
            description: form.description.clone(),
            completed_at: task.completed_at,
        };
        self.store.update_task(task_id, &update)?;
        self.task_mode = TaskDetailMode::None;
        self.set_view(ViewState::ProjectDetail);
        Ok(Signal::RefreshActiveProjectView)
    }

    /// Set or clear a task's completion time, then reload the task list.
    ///
    /// The cursor is only clamped; see [`Self::settle_task_cursor_after_toggle`].
    pub fn toggle_task_completion(
        &mut self,
        task_id: i64,
        completed_at: Option<DateTime<Utc>>,
    ) -> Signal {
        let result = self.try_toggle_task_completion(task_id, completed_at);
        self.finish(result)
    }

    fn try_toggle_task_completion(
        &mut self,
        task_id: i64,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Signal, SessionError> {
        self.require_project_id()?;
        let update = TaskUpdate::with_completion(self.cached_task(task_id)?, completed_at);
        self.store.update_task(task_id, &update)?;
        debug!(task_id, completed = completed_at.is_some(), "task toggled");
        self.reload_tasks()?;
        Ok(Signal::RefreshActiveProjectView)
    }

    /// Apply the post-toggle cursor policy. `toggled_from` is the visual index
    /// the task held before the toggle.
    pub fn settle_task_cursor_after_toggle(&mut self, toggled_from: usize, became_completed: bool) {
        let next = visual_index::cursor_after_toggle(
            &self.visual_tasks(),
            self.task_cursor,
            toggled_from,
            became_completed,
            self.options.step_back_on_complete,
        );
        self.task_cursor = next;
    }

    /// Toggle the task under the cursor and settle the cursor.
    pub fn toggle_task_under_cursor(&mut self) -> Signal {
        let Some(task) = self.task_under_cursor() else {
            return Signal::None;
        };
        let (id, became_completed) = (task.id, !task.is_completed());
        let from = self.task_cursor;
        let completed_at = became_completed.then(Utc::now);
        let signal = self.toggle_task_completion(id, completed_at);
        if signal != Signal::ShowError {
            self.settle_task_cursor_after_toggle(from, became_completed);
        }
        signal
    }

    pub fn delete_task(&mut self, task_id: i64) -> Signal {
        let result = self.try_delete_task(task_id);
        self.finish(result)
    }

    fn try_delete_task(&mut self, task_id: i64) -> Result<Signal, SessionError> {
        self.store.delete_task(task_id)?;
        if self.selected_task == Some(task_id) {
            self.selected_task = None;
        }
        self.reload_tasks()?;
        Ok(Signal::RefreshActiveProjectView)
    }

    /// Open the task at visual index `index` read-only.
    pub fn select_task(&mut self, index: usize) -> Signal {
        let result = self.try_select_task(index, TaskDetailMode::Readonly);
        self.finish(result)
    }

    /// Open the task at visual index `index` for editing.
    pub fn edit_task(&mut self, index: usize) -> Signal {
        let result = self.try_select_task(index, TaskDetailMode::Edit);
        self.finish(result)
    }

    fn try_select_task(&mut self, index: usize, mode: TaskDetailMode) -> Result<Signal, SessionError> {
        let id = self
            .visual_tasks()
            .task_at(index)
            .map(|t| t.id)
            .ok_or(SessionError::InvalidIndex(EntityKind::Task))?;
        self.selected_task = Some(id);
        self.task_cursor = index;
        self.task_mode = mode;
        Ok(Signal::None)
    }

    pub fn move_task_cursor_up(&mut self) {
        self.task_cursor = self.task_cursor.saturating_sub(1);
    }

    pub fn move_task_cursor_down(&mut self) {
        self.task_cursor = self.visual_tasks().clamp(self.task_cursor + 1);
    }

    pub fn toggle_show_completed(&mut self) {
        self.show_completed = !self.show_completed;
        self.task_cursor = self.visual_tasks().clamp(self.task_cursor);
        if self.selected_task().is_some_and(|t| t.is_completed()) && !self.show_completed {
            self.selected_task = None;
            self.task_mode = TaskDetailMode::None;
        }
    }

    // -----------------------------------------------------------------------
    // Logs
    // -----------------------------------------------------------------------

    pub fn create_log(&mut self, form: &LogFormData) -> Signal {
        let result = self.try_create_log(form);
        self.finish(result)
    }

    fn try_create_log(&mut self, form: &LogFormData) -> Result<Signal, SessionError> {
        let project_id = self.require_project_id()?;
        self.store.create_log(project_id, form)?;
        self.set_view(ViewState::ProjectDetail);
        Ok(Signal::RefreshActiveProjectView)
    }

    /// Save the selected log.
    pub fn update_log(&mut self, form: &LogFormData) -> Signal {
        let result = self.try_update_log(form);
        self.finish(result)
    }

    fn try_update_log(&mut self, form: &LogFormData) -> Result<Signal, SessionError> {
        let id = self
            .selected_log()
            .map(|l| l.id)
            .ok_or(SessionError::NoSelection(EntityKind::Log))?;
        self.store.update_log(id, form)?;
        self.log_mode = LogDetailMode::None;
        self.set_view(ViewState::ProjectDetail);
        Ok(Signal::RefreshActiveProjectView)
    }

    pub fn delete_log(&mut self, log_id: i64) -> Signal {
        let result = self.try_delete_log(log_id);
        self.finish(result)
    }

    fn try_delete_log(&mut self, log_id: i64) -> Result<Signal, SessionError> {
        self.store.delete_log(log_id)?;
        if self.selected_log == Some(log_id) {
            self.selected_log = None;
        }
        self.reload_logs()?;
        Ok(Signal::RefreshActiveProjectView)
    }

    /// Open the log at `index` in the pager.
    pub fn select_log(&mut self, index: usize) -> Signal {
        let result = self
            .logs
            .get(index)
            .map(|l| l.id)
            .ok_or(SessionError::InvalidIndex(EntityKind::Log))
            .map(|id| {
                self.selected_log = Some(id);
                self.log_cursor = index;
                self.log_mode = LogDetailMode::Readonly;
                Signal::None
            });
        self.finish(result)
    }

    pub fn move_log_cursor_up(&mut self) {
        self.log_cursor = self.log_cursor.saturating_sub(1);
    }

    pub fn move_log_cursor_down(&mut self) {
        if self.log_cursor + 1 < self.logs.len() {
            self.log_cursor += 1;
        }
    }

    /// Switch focus between the log list and the pager. Only meaningful
    /// while a log is open.
    pub fn toggle_log_focus(&mut self) {
        if self.log_mode != LogDetailMode::Readonly {
            return;
        }
        self.log_focus = match self.log_focus {
            LogFocus::List => LogFocus::Pager,
            LogFocus::Pager => LogFocus::List,
        };
    }

    // -----------------------------------------------------------------------
    // Tabs
    // -----------------------------------------------------------------------

    pub fn set_tab(&mut self, tab: DetailTab) {
        if self.tab != tab {
            debug!(from = ?self.tab, to = ?tab, "tab change");
        }
        self.tab = tab;
        self.reset_detail_state();
    }

    pub fn next_tab(&mut self) {
        self.set_tab(self.tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.set_tab(self.tab.prev());
    }

    // -----------------------------------------------------------------------
    // View transitions
    // -----------------------------------------------------------------------

    pub fn go_to_list_view(&mut self) -> Signal {
        self.clear_active_project();
        self.set_view(ViewState::List);
        Signal::None
    }

    pub fn go_to_project_view(&mut self) -> Signal {
        let result = self.require_project().map(|_| ()).map(|_| {
            self.set_view(ViewState::ProjectDetail);
            Signal::None
        });
        self.finish(result)
    }

    pub fn go_to_create_view(&mut self) -> Signal {
        self.set_view(ViewState::CreateProject);
        Signal::None
    }

    pub fn go_to_update_view(&mut self) -> Signal {
        self.go_to_with_project(ViewState::UpdateProject)
    }

    pub fn go_to_create_task_view(&mut self) -> Signal {
        self.go_to_with_project(ViewState::CreateTask)
    }

    pub fn go_to_create_log_view(&mut self) -> Signal {
        self.go_to_with_project(ViewState::CreateLog)
    }

    pub fn go_to_log_editor(&mut self) -> Signal {
        self.go_to_with_project(ViewState::FullscreenLogEditor)
    }

    fn go_to_with_project(&mut self, view: ViewState) -> Signal {
        let result = self.require_project().map(|_| ()).map(|_| {
            self.set_view(view);
            Signal::None
        });
        self.finish(result)
    }

    pub fn go_to_update_log_view(&mut self) -> Signal {
        let result = self
            .selected_log()
            .map(|_| ())
            .ok_or(SessionError::NoSelection(EntityKind::Log))
            .map(|_| {
                self.set_view(ViewState::UpdateLog);
                Signal::None
            });
        self.finish(result)
    }

    /// Leave the current detail mode, or the project when none is active.
    /// A read-only task or log view is closed before anything else.
    pub fn back(&mut self) -> Signal {
        if self.view != ViewState::ProjectDetail {
            return self.cancel_form();
        }
        if self.task_mode != TaskDetailMode::None || self.log_mode != LogDetailMode::None {
            self.reset_detail_state();
            return Signal::None;
        }
        self.go_to_list_view()
    }

    /// Abandon a form and return to where it was opened from.
    pub fn cancel_form(&mut self) -> Signal {
        let target = match self.view {
            ViewState::CreateProject => ViewState::List,
            ViewState::UpdateProject
            | ViewState::CreateTask
            | ViewState::CreateLog
            | ViewState::UpdateLog
            | ViewState::FullscreenLogEditor => ViewState::ProjectDetail,
            other => other,
        };
        self.set_view(target);
        Signal::None
    }

    /// Leave the task edit pane without saving.
    pub fn cancel_task_edit(&mut self) {
        if self.task_mode == TaskDetailMode::Edit {
            self.task_mode = TaskDetailMode::None;
            self.selected_task = None;
        }
    }

    pub fn quit(&mut self) -> Signal {
        debug!("quit requested");
        Signal::Quit
    }

    // -----------------------------------------------------------------------
    // Delete confirmation
    // -----------------------------------------------------------------------

    fn open_dialog(&mut self, kind: DialogKind, action: DeleteAction, view: ViewState) {
        self.dialog_return = self.view;
        self.dialog = Some(ConfirmDialog::new(kind, action));
        self.set_view(view);
    }

    /// Ask before deleting the project at `index` of [`Self::projects`].
    pub fn open_delete_project_dialog(&mut self, index: usize) -> Signal {
        let result = self
            .projects
            .get(index)
            .map(|p| p.id)
            .ok_or(SessionError::InvalidIndex(EntityKind::Project))
            .map(|id| {
                self.open_dialog(
                    DialogKind::ProjectDelete,
                    DeleteAction::Project { id },
                    ViewState::DeleteProjectConfirm,
                );
                Signal::None
            });
        self.finish(result)
    }

    pub fn open_delete_task_dialog(&mut self, task_id: i64) -> Signal {
        let result = self.cached_task(task_id).map(|_| ()).map(|_| {
            self.open_dialog(
                DialogKind::TaskDelete,
                DeleteAction::Task { id: task_id },
                ViewState::DeleteTaskConfirm,
            );
            Signal::None
        });
        self.finish(result)
    }

    pub fn open_delete_log_dialog(&mut self, log_id: i64) -> Signal {
        let result = self
            .logs
            .iter()
            .find(|l| l.id == log_id)
            .map(|_| ())
            .ok_or(SessionError::NotFound(EntityKind::Log))
            .map(|_| {
                self.open_dialog(
                    DialogKind::LogDelete,
                    DeleteAction::Log { id: log_id },
                    ViewState::DeleteLogConfirm,
                );
                Signal::None
            });
        self.finish(result)
    }

    /// Feed a key to the open dialog. Runs the bound action only when the
    /// dialog is confirmed.
    pub fn dialog_input(&mut self, key: DialogKey) -> Signal {
        let Some(dialog) = self.dialog.take() else {
            return Signal::None;
        };
        match dialog.handle(key) {
            DialogOutcome::Open(dialog) => {
                self.dialog = Some(dialog);
                Signal::None
            }
            DialogOutcome::Dismissed => {
                self.close_dialog();
                Signal::None
            }
            DialogOutcome::Confirmed(action) => {
                self.close_dialog();
                self.confirm_delete(action)
            }
        }
    }

    /// Run a confirmed deletion.
    pub fn confirm_delete(&mut self, action: DeleteAction) -> Signal {
        let result = match action {
            DeleteAction::Project { id } => self.delete_project_by_id(id),
            DeleteAction::Task { id } => self.try_delete_task(id),
            DeleteAction::Log { id } => self.try_delete_log(id),
        };
        self.finish(result)
    }

    pub fn cancel_dialog(&mut self) -> Signal {
        let confirming = matches!(
            self.view,
            ViewState::DeleteProjectConfirm
                | ViewState::DeleteTaskConfirm
                | ViewState::DeleteLogConfirm
        );
        if self.dialog.is_some() || confirming {
            self.close_dialog();
        }
        Signal::None
    }

    fn close_dialog(&mut self) {
        self.dialog = None;
        let target = self.dialog_return;
        self.set_view(target);
    }
}
