//! Comment models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhive_core::types::{DbId, Timestamp, UserId};

/// A comment row from the `comments` table. Append-only; `created_at`
/// is the posted timestamp.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Comment {
    pub id: DbId,
    pub todo_task_id: DbId,
    pub author_id: UserId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment joined with its author's display name.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub todo_task_id: DbId,
    pub author_id: UserId,
    pub author_name: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// Input for posting a comment. The author always comes from the
/// authenticated identity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub content: String,
}
