//! Core logic for the desktop to-do list.
//! Everything except window rendering lives here.

pub mod bootstrap;
pub mod config;
pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use bootstrap::{bootstrap, open_store, StartupError};
pub use config::{load_config, AppConfig, ConfigError, DatabaseConfig, DEFAULT_CONFIG_FILE};
pub use controller::{ActionOutcome, TaskListController};
pub use db::{DbError, Gateway};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{validate_title, Task, TaskId, TaskValidationError};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::task_service::TaskService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
