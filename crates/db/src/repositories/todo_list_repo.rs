//! Repository for the `todo_lists` table.

use sqlx::PgPool;
use taskhive_core::status::TaskStatus;
use taskhive_core::types::DbId;

use crate::models::todo_list::{StatusCounts, TodoList};

/// Column list for todo_lists queries.
const COLUMNS: &str = "id, title, owner_id, version, created_at, updated_at";

/// Provides CRUD operations for lists, always scoped to their owner.
pub struct TodoListRepo;

impl TodoListRepo {
    /// Insert a new list owned by `owner_id`, returning the created row.
    pub async fn create(pool: &PgPool, owner_id: &str, title: &str) -> Result<TodoList, sqlx::Error> {
        let query = format!(
            "INSERT INTO todo_lists (title, owner_id) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoList>(&query)
            .bind(title)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// Load a list by id, verifying ownership in the same statement.
    ///
    /// A missing row and a row owned by someone else are
    /// indistinguishable here, which is exactly what the uniform
    /// not-found contract requires.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: &str,
    ) -> Result<Option<TodoList>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todo_lists WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, TodoList>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// All lists owned by a user, oldest first.
    pub async fn list_for_owner(pool: &PgPool, owner_id: &str) -> Result<Vec<TodoList>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM todo_lists \
             WHERE owner_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, TodoList>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Optimistic rename: only succeeds against the expected version.
    ///
    /// Returns `None` when the row is gone or the version is stale;
    /// the caller re-fetches to tell the two apart.
    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        title: &str,
        expected_version: i64,
    ) -> Result<Option<TodoList>, sqlx::Error> {
        let query = format!(
            "UPDATE todo_lists \
             SET title = $3, version = version + 1 \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoList>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    /// Delete a list if owned by `owner_id`. Cascades to its tasks.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId, owner_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todo_lists WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Task counts by status for one list, plus the overdue count
    /// (due date in the past and status not completed).
    pub async fn status_counts(pool: &PgPool, list_id: DbId) -> Result<StatusCounts, sqlx::Error> {
        sqlx::query_as::<_, StatusCounts>(
            "SELECT \
                 COUNT(*) FILTER (WHERE status_id = $2) AS pending, \
                 COUNT(*) FILTER (WHERE status_id = $3) AS in_progress, \
                 COUNT(*) FILTER (WHERE status_id = $4) AS completed, \
                 COUNT(*) FILTER (WHERE due_date IS NOT NULL \
                                    AND due_date < NOW() \
                                    AND status_id <> $4) AS overdue \
             FROM todo_tasks \
             WHERE todo_list_id = $1",
        )
        .bind(list_id)
        .bind(TaskStatus::Pending.as_id())
        .bind(TaskStatus::InProgress.as_id())
        .bind(TaskStatus::Completed.as_id())
        .fetch_one(pool)
        .await
    }
}
