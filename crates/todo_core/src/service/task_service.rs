//! Task use-case service.
//!
//! # Responsibility
//! - Provide the add/list/remove entry points the list controller calls.
//! - Turn blank-title input into a logged no-op instead of a store call.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::task::{validate_title, Task, TaskId};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use log::info;

/// Use-case service wrapper for task CRUD operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Fetches every stored task in store-defined order.
    pub fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks()
    }

    /// Adds one task from raw entry text.
    ///
    /// # Contract
    /// - Blank input is logged and skipped: returns `Ok(None)`, no store call.
    /// - Otherwise returns the store-assigned ID.
    pub fn add_task(&self, title: &str) -> RepoResult<Option<TaskId>> {
        if let Err(err) = validate_title(title) {
            info!("event=task_add module=service status=skipped reason=\"{err}\"");
            return Ok(None);
        }
        self.repo.insert_task(title).map(Some)
    }

    /// Removes a previously fetched task by its primary key.
    pub fn remove_task(&self, task: &Task) -> RepoResult<()> {
        self.repo.delete_task(task)
    }

    /// Gets one task by ID.
    pub fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(id)
    }
}
