//! Tag models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhive_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A tag row from the `tags` table.
///
/// `name` is the normalized match key (trimmed, lowercased);
/// `display_name` keeps the creator's casing.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub display_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A tag with the number of tasks visible to the requesting user that
/// carry it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TagWithCount {
    pub id: DbId,
    pub name: String,
    pub display_name: String,
    pub task_count: i64,
}

/// Lean tag projection embedded in task payloads.
#[derive(Debug, Clone, Serialize)]
pub struct TagSummary {
    pub id: DbId,
    pub name: String,
    pub display_name: String,
}

impl From<TaskTagRow> for TagSummary {
    fn from(row: TaskTagRow) -> Self {
        TagSummary {
            id: row.id,
            name: row.name,
            display_name: row.display_name,
        }
    }
}

/// One task<->tag association row joined with the tag, used to decorate
/// a page of tasks with their tags in a single query.
#[derive(Debug, Clone, FromRow)]
pub struct TaskTagRow {
    pub todo_task_id: DbId,
    pub id: DbId,
    pub name: String,
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Input for tag creation and for attaching a tag to a task by name.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    pub name: String,
}
