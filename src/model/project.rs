use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of a project name or task/log title, in chars.
pub const MAX_TITLE_CHARS: usize = 100;
/// Maximum length of a project summary, in chars.
pub const MAX_SUMMARY_CHARS: usize = 255;

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Todo,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Archived,
    ];

    /// The value stored in the database
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Todo => "todo",
            ProjectStatus::InProgress => "in progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Archived => "archived",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Todo => "Todo",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Archived => "Archived",
        }
    }

    /// Glyph shown next to the project in lists
    pub fn icon(self) -> &'static str {
        match self {
            ProjectStatus::Todo => "\u{25EF}",
            ProjectStatus::InProgress => "\u{25D0}",
            ProjectStatus::Completed => "\u{25CF}",
            ProjectStatus::Archived => "\u{25A3}",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown project status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for ProjectStatus {
    type Err = ParseStatusError;

    /// Accepts the stored form ("in progress") as well as the CLI forms
    /// ("in-progress", "in_progress"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "todo" => Ok(ProjectStatus::Todo),
            "in progress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            "archived" => Ok(ProjectStatus::Archived),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// A tracked project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub summary: String,
    pub description: String,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
