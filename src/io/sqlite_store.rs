use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info};

use super::store::{self, EntityKind, EntityStore, StoreError};
use crate::model::{
    Log, LogFormData, Project, ProjectFormData, ProjectStatus, Task, TaskFormData, TaskUpdate,
};

const MIGRATIONS: &[(u32, &str)] = &[
    (
        1,
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/migrations/0001_init.sql")),
    ),
    (
        2,
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/migrations/0002_project_indexes.sql"
        )),
    ),
];

const LATEST_SCHEMA_VERSION: u32 = 2;

const PROJECT_COLUMNS: &str =
    "id, name, summary, description, status, created_at_unix_ms, updated_at_unix_ms";
const TASK_COLUMNS: &str = "id, project_id, title, description, completed_at_unix_ms, \
                            created_at_unix_ms, updated_at_unix_ms";
const LOG_COLUMNS: &str =
    "id, project_id, title, description, created_at_unix_ms, updated_at_unix_ms";

/// [`EntityStore`] backed by a single SQLite database file
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and bring its schema up to date.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "opened database");
        Self::from_connection(conn)
    }

    /// A private database that lives as long as the store
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self, StoreError> {
        configure_connection(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(SqliteStore { conn })
    }

    fn project_exists(&self, id: i64) -> Result<bool, StoreError> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM projects WHERE id = ?1", params![id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn get_project(&self, id: i64) -> Result<Project, StoreError> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id], project_from_row)
            .optional()?
            .ok_or(StoreError::NotFound {
                kind: EntityKind::Project,
                id,
            })
    }

    fn get_task(&self, id: i64) -> Result<Task, StoreError> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id], task_from_row)
            .optional()?
            .ok_or(StoreError::NotFound {
                kind: EntityKind::Task,
                id,
            })
    }

    fn get_log(&self, id: i64) -> Result<Log, StoreError> {
        let sql = format!("SELECT {LOG_COLUMNS} FROM logs WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id], log_from_row)
            .optional()?
            .ok_or(StoreError::NotFound {
                kind: EntityKind::Log,
                id,
            })
    }

    fn delete_row(&mut self, table: &str, kind: EntityKind, id: i64) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {table} WHERE id = ?1");
        let changed = self.conn.execute(&sql, params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound { kind, id });
        }
        debug!(%kind, id, "deleted");
        Ok(())
    }
}

impl EntityStore for SqliteStore {
    fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let projects = stmt
            .query_map([], project_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(projects)
    }

    fn create_project(&mut self, form: &ProjectFormData) -> Result<Project, StoreError> {
        store::validate_project(form)?;
        let now = now_ms();
        self.conn.execute(
            "INSERT INTO projects (name, summary, description, status, created_at_unix_ms, updated_at_unix_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![
                form.name.trim(),
                form.summary,
                form.description,
                form.status.as_str(),
                now
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, name = %form.name, "created project");
        self.get_project(id)
    }

    fn update_project(&mut self, id: i64, form: &ProjectFormData) -> Result<Project, StoreError> {
        store::validate_project(form)?;
        let changed = self.conn.execute(
            "UPDATE projects SET name = ?1, summary = ?2, description = ?3, status = ?4, \
             updated_at_unix_ms = ?5 WHERE id = ?6",
            params![
                form.name.trim(),
                form.summary,
                form.description,
                form.status.as_str(),
                now_ms(),
                id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: EntityKind::Project,
                id,
            });
        }
        debug!(id, "updated project");
        self.get_project(id)
    }

    fn delete_project(&mut self, id: i64) -> Result<(), StoreError> {
        self.delete_row("projects", EntityKind::Project, id)
    }

    fn list_tasks_for(&self, project_id: i64) -> Result<Vec<Task>, StoreError> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = ?1 ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(params![project_id], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    fn create_task(&mut self, project_id: i64, form: &TaskFormData) -> Result<Task, StoreError> {
        store::validate_task(&form.title)?;
        if !self.project_exists(project_id)? {
            return Err(StoreError::NotFound {
                kind: EntityKind::Project,
                id: project_id,
            });
        }
        let now = now_ms();
        self.conn.execute(
            "INSERT INTO tasks (project_id, title, description, created_at_unix_ms, updated_at_unix_ms) \
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![project_id, form.title.trim(), form.description, now],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, project_id, "created task");
        self.get_task(id)
    }

    fn update_task(&mut self, id: i64, update: &TaskUpdate) -> Result<Task, StoreError> {
        store::validate_task(&update.title)?;
        let changed = self.conn.execute(
            "UPDATE tasks SET title = ?1, description = ?2, completed_at_unix_ms = ?3, \
             updated_at_unix_ms = ?4 WHERE id = ?5",
            params![
                update.title.trim(),
                update.description,
                update.completed_at.map(|t| t.timestamp_millis()),
                now_ms(),
                id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: EntityKind::Task,
                id,
            });
        }
        debug!(id, completed = update.completed_at.is_some(), "updated task");
        self.get_task(id)
    }

    fn delete_task(&mut self, id: i64) -> Result<(), StoreError> {
        self.delete_row("tasks", EntityKind::Task, id)
    }

    fn list_logs_for(&self, project_id: i64) -> Result<Vec<Log>, StoreError> {
        let sql = format!("SELECT {LOG_COLUMNS} FROM logs WHERE project_id = ?1 ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        let logs = stmt
            .query_map(params![project_id], log_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(logs)
    }

    fn create_log(&mut self, project_id: i64, form: &LogFormData) -> Result<Log, StoreError> {
        store::validate_log(form)?;
        if !self.project_exists(project_id)? {
            return Err(StoreError::NotFound {
                kind: EntityKind::Project,
                id: project_id,
            });
        }
        let now = now_ms();
        self.conn.execute(
            "INSERT INTO logs (project_id, title, description, created_at_unix_ms, updated_at_unix_ms) \
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![project_id, form.title.trim(), form.description, now],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, project_id, "created log");
        self.get_log(id)
    }

    fn update_log(&mut self, id: i64, form: &LogFormData) -> Result<Log, StoreError> {
        store::validate_log(form)?;
        let changed = self.conn.execute(
            "UPDATE logs SET title = ?1, description = ?2, updated_at_unix_ms = ?3 WHERE id = ?4",
            params![form.title.trim(), form.description, now_ms(), id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                kind: EntityKind::Log,
                id,
            });
        }
        debug!(id, "updated log");
        self.get_log(id)
    }

    fn delete_log(&mut self, id: i64) -> Result<(), StoreError> {
        self.delete_row("logs", EntityKind::Log, id)
    }
}

// ---------------------------------------------------------------------------
// Connection setup
// ---------------------------------------------------------------------------

fn configure_connection(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    // Returns the resulting mode; in-memory databases report "memory".
    let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    debug!(journal_mode = %mode, "configured connection");
    Ok(())
}

fn apply_migrations(conn: &mut Connection) -> Result<(), StoreError> {
    let mut current = conn.query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))? as u32;

    if current > LATEST_SCHEMA_VERSION {
        return Err(StoreError::Schema {
            found: current,
            supported: LATEST_SCHEMA_VERSION,
        });
    }
    if current == LATEST_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", *version as i64)?;
        info!(version, "applied migration");
        current = *version;
    }
    tx.commit()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let ms: i64 = row.get(idx)?;
    DateTime::from_timestamp_millis(ms).ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, ms))
}

fn optional_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    match row.get::<_, Option<i64>>(idx)? {
        Some(ms) => DateTime::from_timestamp_millis(ms)
            .map(Some)
            .ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, ms)),
        None => Ok(None),
    }
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    let status: String = row.get(4)?;
    let status = status.parse::<ProjectStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        summary: row.get(2)?,
        description: row.get(3)?,
        status,
        created_at: timestamp(row, 5)?,
        updated_at: timestamp(row, 6)?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        completed_at: optional_timestamp(row, 4)?,
        created_at: timestamp(row, 5)?,
        updated_at: timestamp(row, 6)?,
    })
}

fn log_from_row(row: &Row<'_>) -> rusqlite::Result<Log> {
    Ok(Log {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        created_at: timestamp(row, 4)?,
        updated_at: timestamp(row, 5)?,
    })
}
