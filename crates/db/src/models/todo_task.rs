//! Task models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhive_core::status::TaskStatus;
use taskhive_core::types::{DbId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A task row from the `todo_tasks` table.
///
/// `created_at` is the immutable creation timestamp; `due_date` is
/// stored in UTC.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TodoTask {
    pub id: DbId,
    pub todo_list_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status_id: i16,
    pub due_date: Option<Timestamp>,
    pub assigned_user_id: Option<UserId>,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TodoTask {
    /// Status decoded from `status_id`. The column is constrained to
    /// the seeded lookup ids, so unknown values only appear if the
    /// seed data changes; they fall back to pending.
    pub fn status(&self) -> TaskStatus {
        TaskStatus::from_id(self.status_id).unwrap_or(TaskStatus::Pending)
    }
}

/// A task row joined with its owning list, used wherever the access
/// predicate needs the list owner alongside the task.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TaskWithList {
    pub id: DbId,
    pub todo_list_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status_id: i16,
    pub due_date: Option<Timestamp>,
    pub assigned_user_id: Option<UserId>,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub owner_id: UserId,
    pub list_title: String,
}

impl TaskWithList {
    pub fn status(&self) -> TaskStatus {
        TaskStatus::from_id(self.status_id).unwrap_or(TaskStatus::Pending)
    }
}

/// Lean search-preview projection for incremental-search UIs.
#[derive(Debug, Clone, FromRow)]
pub struct TaskSearchRow {
    pub id: DbId,
    pub title: String,
    pub status_id: i16,
    pub due_date: Option<Timestamp>,
    pub is_overdue: bool,
    pub list_title: String,
}

impl TaskSearchRow {
    pub fn status(&self) -> TaskStatus {
        TaskStatus::from_id(self.status_id).unwrap_or(TaskStatus::Pending)
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Input for creating a task inside a list.
///
/// `due_date` is a wall-clock string from a `datetime-local` input,
/// normalized to UTC before persisting. Status defaults to pending.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoTask {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<String>,
}

/// Full-replace input for the four mutable task fields. The creation
/// timestamp and owning list never change; an absent `due_date`
/// clears the column.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodoTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<String>,
}

/// Input for the status-only update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskStatus {
    pub status: TaskStatus,
}

/// Query parameters for the assigned-tasks listing.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignedTasksParams {
    pub status: Option<String>,
    pub sort: Option<String>,
}

/// Query parameters for task search. `tag_ids` is a comma-separated
/// id list; every listed tag must be present (AND semantics).
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub term: Option<String>,
    pub tag_ids: Option<String>,
}
