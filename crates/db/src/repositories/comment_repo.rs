//! Repository for the `comments` table. Append-only.

use sqlx::PgPool;
use taskhive_core::types::DbId;

use crate::models::comment::{Comment, CommentWithAuthor};

/// Column list for comments queries.
const COLUMNS: &str = "id, todo_task_id, author_id, content, created_at, updated_at";

/// Provides insert and listing for task comments. Comments are
/// immutable once posted; there is no update or delete.
pub struct CommentRepo;

impl CommentRepo {
    /// Post a comment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        todo_task_id: DbId,
        author_id: &str,
        content: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (todo_task_id, author_id, content) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(todo_task_id)
            .bind(author_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// All comments on a task with author display names, oldest first.
    pub async fn list_for_task(
        pool: &PgPool,
        todo_task_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.todo_task_id, c.author_id, u.display_name AS author_name, \
                    c.content, c.created_at \
             FROM comments c \
             JOIN users u ON u.id = c.author_id \
             WHERE c.todo_task_id = $1 \
             ORDER BY c.created_at ASC, c.id ASC",
        )
        .bind(todo_task_id)
        .fetch_all(pool)
        .await
    }
}
