//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical `(id, title)` record for the `tasks` table.
//! - Validate titles before they reach persistence.
//!
//! # Invariants
//! - `id` is assigned by the database and stable once assigned.
//! - A stored title is never empty or whitespace-only.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned primary key of a task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A persisted to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Free text exactly as the user typed it.
    pub title: String,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Validation failures for task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Rejects empty and whitespace-only titles.
///
/// Accepted titles are not normalized; callers store them verbatim.
pub fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_title, Task, TaskId, TaskValidationError};

    #[test]
    fn blank_titles_are_rejected() {
        for title in ["", " ", "\t\n", "   \r\n  "] {
            assert_eq!(validate_title(title), Err(TaskValidationError::EmptyTitle));
        }
    }

    #[test]
    fn titles_with_surrounding_whitespace_are_accepted() {
        assert!(validate_title("  Buy milk ").is_ok());
    }

    #[test]
    fn task_id_serializes_as_plain_integer() {
        let task = Task::new(TaskId(7), "Walk dog");
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"id":7,"title":"Walk dog"}"#);
    }
}
