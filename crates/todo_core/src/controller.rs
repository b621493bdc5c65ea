//! Toolkit-independent state behind the to-do window.
//!
//! # Responsibility
//! - Hold the entry text, the last fetched task snapshot and the selection.
//! - Run add/remove through `TaskService` and refetch the whole list after
//!   every successful mutation.
//!
//! # Invariants
//! - The snapshot is only replaced by a successful "select all"; failures
//!   leave the previous snapshot and selection in place.
//! - `load` leaves nothing selected; only successful add/remove clear the
//!   selection and then set it to the last index (`None` for an empty list).
//! - A remove whose row is already gone still refetches.
//! - Rendering reads the snapshot only; it never queries the store.

use crate::model::task::Task;
use crate::repo::task_repo::{RepoError, TaskRepository};
use crate::service::task_service::TaskService;
use log::{error, info, warn};

/// Result of one user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The store now reflects the action.
    Applied,
    /// Nothing to do (blank entry, no selection).
    Skipped,
    /// The store call failed; state is unchanged.
    Failed,
}

#[derive(Debug, Default)]
pub struct TaskListController {
    entry: String,
    tasks: Vec<Task>,
    selected: Option<usize>,
    last_error: Option<String>,
}

impl TaskListController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Mutable access for the text widget.
    pub fn entry_mut(&mut self) -> &mut String {
        &mut self.entry
    }

    pub fn set_entry(&mut self, text: impl Into<String>) {
        self.entry = text.into();
    }

    /// Last successfully fetched tasks, in store order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected.and_then(|index| self.tasks.get(index))
    }

    /// Message of the most recent failed store call, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Single selection; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.tasks.len() {
            self.selected = Some(index);
        }
    }

    /// Initial fetch: replaces the snapshot with nothing selected.
    ///
    /// Returns `false` and keeps the stale snapshot on failure.
    pub fn load<R: TaskRepository>(&mut self, service: &TaskService<R>) -> bool {
        if !self.fetch(service) {
            return false;
        }
        self.selected = None;
        true
    }

    /// Post-mutation fetch: clear the selection, then jump to the last row.
    fn refresh_after_mutation<R: TaskRepository>(&mut self, service: &TaskService<R>) -> bool {
        if !self.fetch(service) {
            return false;
        }
        self.selected = None;
        self.selected = self.tasks.len().checked_sub(1);
        true
    }

    fn fetch<R: TaskRepository>(&mut self, service: &TaskService<R>) -> bool {
        match service.list_tasks() {
            Ok(tasks) => {
                self.tasks = tasks;
                self.last_error = None;
                true
            }
            Err(err) => {
                error!("event=list_refresh module=controller status=error error={err}");
                self.last_error = Some(format!("Error fetching tasks: {err}"));
                false
            }
        }
    }

    /// Add button: inserts the entry text, refreshes, then clears the entry.
    pub fn submit<R: TaskRepository>(&mut self, service: &TaskService<R>) -> ActionOutcome {
        match service.add_task(&self.entry) {
            Ok(Some(id)) => {
                info!("event=task_add module=controller status=ok task_id={id}");
                self.refresh_after_mutation(service);
                self.entry.clear();
                ActionOutcome::Applied
            }
            Ok(None) => ActionOutcome::Skipped,
            Err(err) => {
                error!("event=task_add module=controller status=error error={err}");
                self.last_error = Some(format!("Error adding task: {err}"));
                ActionOutcome::Failed
            }
        }
    }

    /// Remove button: deletes the selected row of the snapshot, then refreshes.
    pub fn remove_selected<R: TaskRepository>(
        &mut self,
        service: &TaskService<R>,
    ) -> ActionOutcome {
        let Some(task) = self.selected_task().cloned() else {
            warn!("event=task_remove module=controller status=skipped reason=no_selection");
            return ActionOutcome::Skipped;
        };

        match service.remove_task(&task) {
            Ok(()) => {
                info!(
                    "event=task_remove module=controller status=ok task_id={}",
                    task.id
                );
                self.refresh_after_mutation(service);
                ActionOutcome::Applied
            }
            Err(RepoError::NotFound(id)) => {
                info!("event=task_remove module=controller status=already_removed task_id={id}");
                self.refresh_after_mutation(service);
                ActionOutcome::Applied
            }
            Err(err) => {
                error!(
                    "event=task_remove module=controller status=error task_id={} error={err}",
                    task.id
                );
                self.last_error = Some(format!("Error removing task: {err}"));
                ActionOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionOutcome, TaskListController};
    use crate::model::task::{Task, TaskId};
    use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
    use crate::service::task_service::TaskService;
    use std::cell::{Cell, RefCell};

    /// In-memory stand-in whose list call can be made to fail.
    #[derive(Default)]
    struct FlakyRepo {
        rows: RefCell<Vec<Task>>,
        next_id: Cell<i64>,
        fail_list: Cell<bool>,
        fail_delete: Cell<bool>,
    }

    impl TaskRepository for FlakyRepo {
        fn list_tasks(&self) -> RepoResult<Vec<Task>> {
            if self.fail_list.get() {
                return Err(RepoError::MissingRequiredTable("tasks"));
            }
            Ok(self.rows.borrow().clone())
        }

        fn insert_task(&self, title: &str) -> RepoResult<TaskId> {
            let id = TaskId(self.next_id.get() + 1);
            self.next_id.set(id.0);
            self.rows.borrow_mut().push(Task::new(id, title));
            Ok(id)
        }

        fn delete_task(&self, task: &Task) -> RepoResult<()> {
            if self.fail_delete.get() {
                return Err(RepoError::MissingRequiredTable("tasks"));
            }
            let mut rows = self.rows.borrow_mut();
            let before = rows.len();
            rows.retain(|row| row.id != task.id);
            if rows.len() == before {
                return Err(RepoError::NotFound(task.id));
            }
            Ok(())
        }

        fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
            Ok(self.rows.borrow().iter().find(|row| row.id == id).cloned())
        }
    }

    #[test]
    fn failed_refresh_keeps_stale_snapshot_and_selection() {
        let repo = FlakyRepo::default();
        let service = TaskService::new(&repo);
        let mut controller = TaskListController::new();
        controller.set_entry("a");
        controller.submit(&service);
        controller.set_entry("b");
        controller.submit(&service);
        controller.select(0);

        repo.fail_list.set(true);
        assert!(!controller.load(&service));
        assert_eq!(controller.tasks().len(), 2);
        assert_eq!(controller.selected(), Some(0));
        assert!(controller.last_error().is_some());

        repo.fail_list.set(false);
        assert!(controller.load(&service));
        assert!(controller.last_error().is_none());
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn removing_row_deleted_elsewhere_drops_it_from_snapshot() {
        let repo = FlakyRepo::default();
        let service = TaskService::new(&repo);
        let mut controller = TaskListController::new();
        controller.set_entry("ghost");
        controller.submit(&service);

        repo.rows.borrow_mut().clear();
        assert_eq!(controller.remove_selected(&service), ActionOutcome::Applied);
        assert!(controller.tasks().is_empty());
        assert_eq!(controller.selected(), None);
        assert!(controller.last_error().is_none());

        assert_eq!(controller.remove_selected(&service), ActionOutcome::Skipped);
    }

    #[test]
    fn remove_failure_other_than_missing_row_keeps_state() {
        let repo = FlakyRepo::default();
        let service = TaskService::new(&repo);
        let mut controller = TaskListController::new();
        controller.set_entry("kept");
        controller.submit(&service);

        repo.fail_delete.set(true);
        assert_eq!(controller.remove_selected(&service), ActionOutcome::Failed);
        assert_eq!(controller.tasks().len(), 1);
        assert_eq!(controller.selected(), Some(0));
        assert!(controller
            .last_error()
            .is_some_and(|message| message.starts_with("Error removing task")));
    }

    #[test]
    fn select_ignores_out_of_range_index() {
        let mut controller = TaskListController::new();
        controller.select(3);
        assert_eq!(controller.selected(), None);
    }
}
