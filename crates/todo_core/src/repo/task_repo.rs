//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/insert/delete over the `tasks` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Each operation is a single round trip with no transaction wrapping.
//! - Listing has no `ORDER BY`; row order is whatever the store returns.
//! - Blank titles are rejected before any SQL runs.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::task::{validate_title, Task, TaskId, TaskValidationError};
use log::{debug, error, info};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT id, title FROM tasks";
const TASKS_TABLE: &str = "tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    NotFound(TaskId),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_) => None,
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
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn insert_task(&self, title: &str) -> RepoResult<TaskId>;
    fn delete_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
}

impl<R: TaskRepository + ?Sized> TaskRepository for &R {
    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        (**self).list_tasks()
    }

    fn insert_task(&self, title: &str) -> RepoResult<TaskId> {
        (**self).insert_task(title)
    }

    fn delete_task(&self, task: &Task) -> RepoResult<()> {
        (**self).delete_task(task)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        (**self).get_task(id)
    }
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Wraps a connection the caller has already run `create_schema` on.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection whose schema has already been applied.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is behind this binary.
    /// - `MissingRequiredTable` when `tasks` is absent despite the version.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let has_table: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [TASKS_TABLE],
            |row| row.get(0),
        )?;
        if !has_table {
            return Err(RepoError::MissingRequiredTable(TASKS_TABLE));
        }

        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let result = select_all_tasks(self.conn);

        match &result {
            Ok(tasks) => debug!(
                "event=task_list module=repo status=ok count={}",
                tasks.len()
            ),
            Err(err) => error!(
                "event=task_list module=repo status=error error_code=task_list_failed error={}",
                err
            ),
        }
        result
    }

    fn insert_task(&self, title: &str) -> RepoResult<TaskId> {
        validate_title(title)?;

        match self
            .conn
            .execute("INSERT INTO tasks (title) VALUES (?1);", params![title])
        {
            Ok(_) => {
                let id = TaskId(self.conn.last_insert_rowid());
                info!("event=task_insert module=repo status=ok task_id={id}");
                Ok(id)
            }
            Err(err) => {
                error!(
                    "event=task_insert module=repo status=error error_code=task_insert_failed error={}",
                    err
                );
                Err(err.into())
            }
        }
    }

    fn delete_task(&self, task: &Task) -> RepoResult<()> {
        let changed = match self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", params![task.id.0])
        {
            Ok(changed) => changed,
            Err(err) => {
                error!(
                    "event=task_delete module=repo status=error task_id={} error_code=task_delete_failed error={}",
                    task.id, err
                );
                return Err(err.into());
            }
        };

        if changed == 0 {
            info!(
                "event=task_delete module=repo status=not_found task_id={}",
                task.id
            );
            return Err(RepoError::NotFound(task.id));
        }

        info!("event=task_delete module=repo status=ok task_id={}", task.id);
        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let task = self
            .conn
            .query_row(
                &format!("{TASK_SELECT_SQL} WHERE id = ?1;"),
                params![id.0],
                |row| Ok((row.get::<_, i64>("id")?, row.get::<_, String>("title")?)),
            )
            .optional()?;
        Ok(task.map(|(id, title)| Task::new(id, title)))
    }
}

fn select_all_tasks(conn: &Connection) -> RepoResult<Vec<Task>> {
    let mut stmt = conn.prepare(&format!("{TASK_SELECT_SQL};"))?;
    let mut rows = stmt.query([])?;
    let mut tasks = Vec::new();
    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }
    Ok(tasks)
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    Ok(Task {
        id: TaskId(row.get("id")?),
        title: row.get("title")?,
    })
}
