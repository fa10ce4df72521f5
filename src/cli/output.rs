use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Log, Project, ProjectStatus, Task};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ProjectJson {
    pub id: i64,
    pub name: String,
    pub summary: String,
    pub description: String,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tasks: Vec<TaskJson>,
    pub logs: Vec<LogJson>,
}

#[derive(Serialize)]
pub struct TaskJson {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct LogJson {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a create-* command in JSON mode
#[derive(Serialize)]
pub struct CreatedJson {
    pub kind: &'static str,
    pub id: i64,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone(),
        completed: task.is_completed(),
        completed_at: task.completed_at,
    }
}

pub fn log_to_json(log: &Log) -> LogJson {
    LogJson {
        id: log.id,
        title: log.title.clone(),
        description: log.description.clone(),
        created_at: log.created_at,
    }
}

pub fn project_to_json(project: &Project, tasks: &[Task], logs: &[Log]) -> ProjectJson {
    ProjectJson {
        id: project.id,
        name: project.name.clone(),
        summary: project.summary.clone(),
        description: project.description.clone(),
        status: project.status,
        created_at: project.created_at,
        updated_at: project.updated_at,
        tasks: tasks.iter().map(task_to_json).collect(),
        logs: logs.iter().map(log_to_json).collect(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Format one project with its tasks and logs for `list-projects`
pub fn format_project_listing(project: &Project, tasks: &[Task], logs: &[Log]) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "Project {}: {} ({})",
        project.id,
        project.name,
        project.status.label()
    ));
    if !project.summary.is_empty() {
        lines.push(format!("  {}", project.summary));
    }
    for task in tasks {
        lines.push(format!("  {} {} {}", task.checkbox(), task.id, task.title));
    }
    for log in logs {
        lines.push(format!("  log {} {}", log.id, log.display_title()));
    }
    lines
}
