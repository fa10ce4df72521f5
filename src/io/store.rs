use std::fmt;
use std::path::PathBuf;

use crate::model::{
    Log, LogFormData, MAX_SUMMARY_CHARS, MAX_TITLE_CHARS, Project, ProjectFormData, Task,
    TaskFormData, TaskUpdate,
};

/// The three record kinds the store manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    Task,
    Log,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Project => "project",
            EntityKind::Task => "task",
            EntityKind::Log => "log",
        })
    }
}

/// Error type for persistence operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },
    #[error("{0}")]
    Invalid(String),
    #[error("failed to create database directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to open database at {path}: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    #[error("database schema v{found} is newer than this build (v{supported})")]
    Schema { found: u32, supported: u32 },
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Synchronous CRUD over projects, tasks and logs.
///
/// List calls return records in creation order. Writes validate their input
/// and fail with [`StoreError::Invalid`] before touching storage; updates and
/// deletes of an unknown id fail with [`StoreError::NotFound`].
pub trait EntityStore {
    fn list_projects(&self) -> Result<Vec<Project>, StoreError>;
    fn create_project(&mut self, form: &ProjectFormData) -> Result<Project, StoreError>;
    fn update_project(&mut self, id: i64, form: &ProjectFormData) -> Result<Project, StoreError>;
    /// Deleting a project also removes its tasks and logs.
    fn delete_project(&mut self, id: i64) -> Result<(), StoreError>;

    fn list_tasks_for(&self, project_id: i64) -> Result<Vec<Task>, StoreError>;
    fn create_task(&mut self, project_id: i64, form: &TaskFormData) -> Result<Task, StoreError>;
    fn update_task(&mut self, id: i64, update: &TaskUpdate) -> Result<Task, StoreError>;
    fn delete_task(&mut self, id: i64) -> Result<(), StoreError>;

    fn list_logs_for(&self, project_id: i64) -> Result<Vec<Log>, StoreError>;
    fn create_log(&mut self, project_id: i64, form: &LogFormData) -> Result<Log, StoreError>;
    fn update_log(&mut self, id: i64, form: &LogFormData) -> Result<Log, StoreError>;
    fn delete_log(&mut self, id: i64) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn check_len(field: &str, value: &str, max: usize) -> Result<(), StoreError> {
    let len = value.chars().count();
    if len > max {
        return Err(StoreError::Invalid(format!(
            "{} is too long ({} chars, max {})",
            field, len, max
        )));
    }
    Ok(())
}

fn check_required(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Invalid(format!("{} is required", field)));
    }
    Ok(())
}

pub fn validate_project(form: &ProjectFormData) -> Result<(), StoreError> {
    check_required("name", &form.name)?;
    check_len("name", &form.name, MAX_TITLE_CHARS)?;
    check_len("summary", &form.summary, MAX_SUMMARY_CHARS)
}

pub fn validate_task(title: &str) -> Result<(), StoreError> {
    check_required("title", title)?;
    check_len("title", title, MAX_TITLE_CHARS)
}

pub fn validate_log(form: &LogFormData) -> Result<(), StoreError> {
    check_len("title", &form.title, MAX_TITLE_CHARS)
}
