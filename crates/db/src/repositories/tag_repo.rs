//! Repository for the `tags` and `task_tags` tables.
//!
//! Tag creation is an atomic upsert against the normalized-name unique
//! constraint, so two concurrent creates of the same name converge on
//! one row. Attach and detach are idempotent.

use sqlx::PgPool;
use taskhive_core::types::DbId;

use crate::models::tag::{Tag, TagWithCount, TaskTagRow};

/// Column list for tags queries.
const COLUMNS: &str = "id, name, display_name, created_at, updated_at";

/// Provides tag CRUD and task<->tag associations.
pub struct TagRepo;

impl TagRepo {
    // -----------------------------------------------------------------------
    // Tag CRUD
    // -----------------------------------------------------------------------

    /// Create a tag or return the existing one for the normalized name.
    ///
    /// The conflict arm is a no-op update so the statement still
    /// returns the row; the first writer's display casing wins.
    pub async fn find_or_create(
        pool: &PgPool,
        name: &str,
        display_name: &str,
    ) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name, display_name) \
             VALUES ($1, $2) \
             ON CONFLICT (name) DO UPDATE SET display_name = tags.display_name \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .bind(display_name)
            .fetch_one(pool)
            .await
    }

    /// Plain insert for explicit tag creation. A duplicate normalized
    /// name violates `uq_tags_name` and surfaces as a conflict.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        display_name: &str,
    ) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name, display_name) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .bind(display_name)
            .fetch_one(pool)
            .await
    }

    /// Find a tag by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a tag by its normalized name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE name = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// All tags ordered by normalized name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags ORDER BY name ASC");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    /// All tags with the number of tasks visible to `user_id` (list
    /// owner or assignee) carrying each, ordered by name. Tags on
    /// other people's tasks count zero.
    pub async fn list_with_counts(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<TagWithCount>, sqlx::Error> {
        sqlx::query_as::<_, TagWithCount>(
            "SELECT tg.id, tg.name, tg.display_name, \
                    COUNT(tt.id) FILTER (WHERE l.owner_id = $1 \
                                            OR t.assigned_user_id = $1) AS task_count \
             FROM tags tg \
             LEFT JOIN task_tags tt ON tt.tag_id = tg.id \
             LEFT JOIN todo_tasks t ON t.id = tt.todo_task_id \
             LEFT JOIN todo_lists l ON l.id = t.todo_list_id \
             GROUP BY tg.id, tg.name, tg.display_name \
             ORDER BY tg.name ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Tags that appear on at least one task visible to `user_id`,
    /// ordered by name. Feeds the search page's tag facets.
    pub async fn visible_for_user(pool: &PgPool, user_id: &str) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT DISTINCT tg.id, tg.name, tg.display_name, tg.created_at, tg.updated_at \
             FROM tags tg \
             JOIN task_tags tt ON tt.tag_id = tg.id \
             JOIN todo_tasks t ON t.id = tt.todo_task_id \
             JOIN todo_lists l ON l.id = t.todo_list_id \
             WHERE l.owner_id = $1 OR t.assigned_user_id = $1 \
             ORDER BY tg.name ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Delete a tag by ID. Cascade removes its task associations but
    /// never the tasks. Returns `true` if a tag was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Task associations
    // -----------------------------------------------------------------------

    /// Attach a tag to a task. Idempotent: re-attaching is a no-op.
    ///
    /// Returns `true` if a new association was created.
    pub async fn attach(pool: &PgPool, todo_task_id: DbId, tag_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO task_tags (todo_task_id, tag_id) \
             VALUES ($1, $2) \
             ON CONFLICT (todo_task_id, tag_id) DO NOTHING",
        )
        .bind(todo_task_id)
        .bind(tag_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Detach a tag from a task. Idempotent: detaching an absent
    /// association is a no-op. Returns `true` if a row was removed.
    pub async fn detach(pool: &PgPool, todo_task_id: DbId, tag_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM task_tags WHERE todo_task_id = $1 AND tag_id = $2",
        )
        .bind(todo_task_id)
        .bind(tag_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All tags on one task, ordered by name.
    pub async fn tags_for_task(pool: &PgPool, todo_task_id: DbId) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT tg.id, tg.name, tg.display_name, tg.created_at, tg.updated_at \
             FROM task_tags tt \
             JOIN tags tg ON tg.id = tt.tag_id \
             WHERE tt.todo_task_id = $1 \
             ORDER BY tg.name ASC",
        )
        .bind(todo_task_id)
        .fetch_all(pool)
        .await
    }

    /// Association rows for a set of tasks, used to decorate a listing
    /// page with each task's tags in one round trip.
    pub async fn tags_for_tasks(
        pool: &PgPool,
        todo_task_ids: &[DbId],
    ) -> Result<Vec<TaskTagRow>, sqlx::Error> {
        sqlx::query_as::<_, TaskTagRow>(
            "SELECT tt.todo_task_id, tg.id, tg.name, tg.display_name \
             FROM task_tags tt \
             JOIN tags tg ON tg.id = tt.tag_id \
             WHERE tt.todo_task_id = ANY($1) \
             ORDER BY tt.todo_task_id ASC, tg.name ASC",
        )
        .bind(todo_task_ids)
        .fetch_all(pool)
        .await
    }
}
