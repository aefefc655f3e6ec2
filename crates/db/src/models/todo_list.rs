//! To-do list models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhive_core::types::{DbId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A list row from the `todo_lists` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TodoList {
    pub id: DbId,
    pub title: String,
    pub owner_id: UserId,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Input for creating a list. The owner always comes from the
/// authenticated identity, never from the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoList {
    pub title: String,
}

/// Input for renaming a list.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodoList {
    pub title: String,
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Per-list task counts by status, plus the overdue count.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub overdue: i64,
}
