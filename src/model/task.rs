use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task belonging to a project. Pending while `completed_at` is unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Checkbox shown in task lists
    pub fn checkbox(&self) -> &'static str {
        if self.is_completed() { "[x]" } else { "[ ]" }
    }
}
