//! Form state for creating and editing projects, tasks and logs.
//!
//! Each form owns its input buffers and turns keys into either continued
//! editing or a [`FormOutcome`] carrying typed form data.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::editor::{LineInput, TextArea};
use crate::model::{
    FormOutcome, Log, LogFormData, MAX_SUMMARY_CHARS, MAX_TITLE_CHARS, Project, ProjectFormData,
    ProjectStatus, Task, TaskFormData,
};

fn is_save(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s')
}

fn is_next_field(key: &KeyEvent) -> bool {
    key.code == KeyCode::Tab && !key.modifiers.contains(KeyModifiers::SHIFT)
}

fn is_prev_field(key: &KeyEvent) -> bool {
    key.code == KeyCode::BackTab
        || (key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT))
}

// ---------------------------------------------------------------------------
// Project form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Name,
    Summary,
    Description,
    Status,
}

impl ProjectField {
    const ORDER: [ProjectField; 4] = [
        ProjectField::Name,
        ProjectField::Summary,
        ProjectField::Description,
        ProjectField::Status,
    ];

    fn step(self, forward: bool) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let n = Self::ORDER.len();
        let next = if forward { (i + 1) % n } else { (i + n - 1) % n };
        Self::ORDER[next]
    }
}

#[derive(Debug, Clone)]
pub struct ProjectForm {
    pub name: LineInput,
    pub summary: LineInput,
    pub description: TextArea,
    pub status: ProjectStatus,
    pub focus: ProjectField,
}

impl Default for ProjectForm {
    fn default() -> Self {
        ProjectForm {
            name: LineInput::with_limit(MAX_TITLE_CHARS),
            summary: LineInput::with_limit(MAX_SUMMARY_CHARS),
            description: TextArea::new(),
            status: ProjectStatus::Todo,
            focus: ProjectField::Name,
        }
    }
}

impl ProjectForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefilled with an existing project's values
    pub fn for_project(project: &Project) -> Self {
        let mut form = Self::default();
        form.name.set_text(&project.name);
        form.summary.set_text(&project.summary);
        form.description.set_text(&project.description);
        form.status = project.status;
        form
    }

    pub fn data(&self) -> ProjectFormData {
        ProjectFormData {
            name: self.name.text().trim().to_string(),
            summary: self.summary.text().trim().to_string(),
            description: self.description.text().trim_end().to_string(),
            status: self.status,
        }
    }

    fn cycle_status(&mut self, forward: bool) {
        let all = ProjectStatus::ALL;
        let i = all.iter().position(|s| *s == self.status).unwrap_or(0);
        let n = all.len();
        self.status = all[if forward { (i + 1) % n } else { (i + n - 1) % n }];
    }

    /// Esc aborts, Ctrl+S submits from any field, Enter advances through the
    /// single-line fields and submits on the status selector.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormOutcome<ProjectFormData>> {
        if key.code == KeyCode::Esc {
            return Some(FormOutcome::Aborted);
        }
        if is_save(&key) {
            return Some(FormOutcome::Submitted(self.data()));
        }
        if is_next_field(&key) {
            self.focus = self.focus.step(true);
            return None;
        }
        if is_prev_field(&key) {
            self.focus = self.focus.step(false);
            return None;
        }
        match self.focus {
            ProjectField::Name | ProjectField::Summary if key.code == KeyCode::Enter => {
                self.focus = self.focus.step(true);
            }
            ProjectField::Name => {
                self.name.handle_key(key);
            }
            ProjectField::Summary => {
                self.summary.handle_key(key);
            }
            ProjectField::Description => {
                self.description.handle_key(key);
            }
            ProjectField::Status => match key.code {
                KeyCode::Enter => return Some(FormOutcome::Submitted(self.data())),
                KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                    self.cycle_status(false)
                }
                KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                    self.cycle_status(true)
                }
                _ => {}
            },
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Task form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    pub title: LineInput,
    pub description: LineInput,
    pub focus: TaskField,
}

impl Default for TaskForm {
    fn default() -> Self {
        TaskForm {
            title: LineInput::with_limit(MAX_TITLE_CHARS),
            description: LineInput::new(),
            focus: TaskField::Title,
        }
    }
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_task(task: &Task) -> Self {
        let mut form = Self::default();
        form.title.set_text(&task.title);
        form.description.set_text(&task.description);
        form
    }

    pub fn data(&self) -> TaskFormData {
        TaskFormData {
            title: self.title.text().trim().to_string(),
            description: self.description.text().trim().to_string(),
        }
    }

    /// Enter on the title moves to the description; Enter on the
    /// description (or Ctrl+S anywhere) submits.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormOutcome<TaskFormData>> {
        if key.code == KeyCode::Esc {
            return Some(FormOutcome::Aborted);
        }
        if is_save(&key) {
            return Some(FormOutcome::Submitted(self.data()));
        }
        if is_next_field(&key) || is_prev_field(&key) {
            self.focus = match self.focus {
                TaskField::Title => TaskField::Description,
                TaskField::Description => TaskField::Title,
            };
            return None;
        }
        match (self.focus, key.code) {
            (TaskField::Title, KeyCode::Enter) => self.focus = TaskField::Description,
            (TaskField::Description, KeyCode::Enter) => {
                return Some(FormOutcome::Submitted(self.data()));
            }
            (TaskField::Title, _) => {
                self.title.handle_key(key);
            }
            (TaskField::Description, _) => {
                self.description.handle_key(key);
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Log form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogField {
    Title,
    Body,
}

#[derive(Debug, Clone)]
pub struct LogForm {
    pub title: LineInput,
    pub body: TextArea,
    pub focus: LogField,
}

impl Default for LogForm {
    fn default() -> Self {
        LogForm {
            title: LineInput::with_limit(MAX_TITLE_CHARS),
            body: TextArea::new(),
            focus: LogField::Title,
        }
    }
}

impl LogForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefilled for editing; the cursor starts in the body.
    pub fn for_log(log: &Log) -> Self {
        let mut form = Self::default();
        form.title.set_text(&log.title);
        form.body.set_text(&log.description);
        form.focus = LogField::Body;
        form
    }

    pub fn data(&self) -> LogFormData {
        LogFormData {
            title: self.title.text().trim().to_string(),
            description: self.body.text().trim().to_string(),
        }
    }

    /// Ctrl+S saves and Esc aborts. Enter in the title moves to the body;
    /// in the body it inserts a line break.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormOutcome<LogFormData>> {
        if key.code == KeyCode::Esc {
            return Some(FormOutcome::Aborted);
        }
        if is_save(&key) {
            return Some(FormOutcome::Submitted(self.data()));
        }
        if is_next_field(&key) || is_prev_field(&key) {
            self.focus = match self.focus {
                LogField::Title => LogField::Body,
                LogField::Body => LogField::Title,
            };
            return None;
        }
        match (self.focus, key.code) {
            (LogField::Title, KeyCode::Enter) => self.focus = LogField::Body,
            (LogField::Title, _) => {
                self.title.handle_key(key);
            }
            (LogField::Body, _) => {
                self.body.handle_key(key);
            }
        }
        None
    }
}
