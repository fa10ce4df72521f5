use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A free-form markdown note attached to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub id: i64,
    pub project_id: i64,
    /// May be empty
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Log {
    /// Title for list display, falling back to the creation date
    pub fn display_title(&self) -> String {
        let title = self.title.trim();
        if title.is_empty() {
            format!("Log {}", self.created_at.format("%Y-%m-%d %H:%M"))
        } else {
            title.to_string()
        }
    }
}
