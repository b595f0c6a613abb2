//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the create and list-all APIs over canonical `tasks` storage.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Listing returns tasks in insertion order (`id` ascending).
//! - Read paths decode rows structurally and never drop a legal row; only a
//!   non-positive id is reported as `InvalidData`.

use crate::db::DbError;
use crate::model::task::{Task, TaskValidationError};
use log::{debug, error};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT id, description FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    /// The persistence medium could not be reached or the query failed.
    StoreUnavailable(DbError),
    InvalidData(String),
}

impl RepoError {
    /// Stable short code used in logs and API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::StoreUnavailable(err) => write!(f, "task store unavailable: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::StoreUnavailable(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::StoreUnavailable(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::StoreUnavailable(DbError::Sqlite(value))
    }
}

/// Aggregate view of the store used by diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    pub count: u64,
    /// `created_at` of the newest task in epoch milliseconds, `None` when empty.
    pub last_created_at_ms: Option<i64>,
}

/// Repository interface for task persistence.
///
/// There is intentionally no update or delete operation.
pub trait TaskRepository {
    fn create_task(&self, description: &str) -> RepoResult<Task>;
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn stats(&self) -> RepoResult<TaskStats>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, description: &str) -> RepoResult<Task> {
        Task::validate_description(description)?;

        let result = self.conn.execute(
            "INSERT INTO tasks (description) VALUES (?1);",
            params![description],
        );
        if let Err(err) = result {
            error!("event=task_create module=repo status=error error={err}");
            return Err(err.into());
        }

        let id = self.conn.last_insert_rowid();
        debug!("event=task_create module=repo status=ok task_id={id}");
        Ok(Task::new(id, description))
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        debug!(
            "event=task_list module=repo status=ok count={}",
            tasks.len()
        );
        Ok(tasks)
    }

    fn stats(&self) -> RepoResult<TaskStats> {
        let (count, last_created_at_ms): (i64, Option<i64>) = self.conn.query_row(
            "SELECT COUNT(*), MAX(created_at) FROM tasks;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let count = u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative task count `{count}`")))?;

        Ok(TaskStats {
            count,
            last_created_at_ms,
        })
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let task = Task {
        id: row.get("id")?,
        description: row.get("description")?,
    };
    task.validate()
        .map_err(|err| RepoError::InvalidData(format!("tasks.id: {err}")))?;
    Ok(task)
}
