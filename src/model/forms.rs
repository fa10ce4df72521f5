//! Typed values submitted by the project, task and log forms.

use chrono::{DateTime, Utc};

use super::log::Log;
use super::project::{Project, ProjectStatus};
use super::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFormData {
    pub name: String,
    pub summary: String,
    pub description: String,
    pub status: ProjectStatus,
}

impl From<&Project> for ProjectFormData {
    fn from(p: &Project) -> Self {
        ProjectFormData {
            name: p.name.clone(),
            summary: p.summary.clone(),
            description: p.description.clone(),
            status: p.status,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFormData {
    pub title: String,
    pub description: String,
}

impl From<&Task> for TaskFormData {
    fn from(t: &Task) -> Self {
        TaskFormData {
            title: t.title.clone(),
            description: t.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFormData {
    pub title: String,
    pub description: String,
}

impl From<&Log> for LogFormData {
    fn from(l: &Log) -> Self {
        LogFormData {
            title: l.title.clone(),
            description: l.description.clone(),
        }
    }
}

/// The full mutable field set of a task, as accepted by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: String,
    pub description: String,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskUpdate {
    /// Keep the task's content, replacing only its completion timestamp
    pub fn with_completion(task: &Task, completed_at: Option<DateTime<Utc>>) -> Self {
        TaskUpdate {
            title: task.title.clone(),
            description: task.description.clone(),
            completed_at,
        }
    }
}

/// How a form interaction ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome<T> {
    Submitted(T),
    Aborted,
}
