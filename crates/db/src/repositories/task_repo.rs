//! Repository for the `todo_tasks` table.
//!
//! Covers task CRUD, the status and assignment mutations, the
//! assigned-tasks listing and the search queries. Listings are ordered
//! by creation time unless a sort key says otherwise.

use sqlx::PgPool;
use taskhive_core::status::{TaskSortKey, TaskStatus};
use taskhive_core::types::{DbId, Timestamp};

use crate::models::todo_task::{TaskSearchRow, TaskWithList, TodoTask};

/// Column list for todo_tasks queries.
const COLUMNS: &str = "\
    id, todo_list_id, title, description, status_id, due_date, \
    assigned_user_id, version, created_at, updated_at";

/// Column list for queries joining the owning list.
const JOINED_COLUMNS: &str = "\
    t.id, t.todo_list_id, t.title, t.description, t.status_id, t.due_date, \
    t.assigned_user_id, t.version, t.created_at, t.updated_at, \
    l.owner_id, l.title AS list_title";

/// Result cap for the incremental-search preview.
const PREVIEW_LIMIT: i64 = 10;

/// Provides CRUD and query operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// `created_at` is set by the database and never changes afterwards.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        todo_list_id: DbId,
        title: &str,
        description: Option<&str>,
        status_id: Option<i16>,
        due_date: Option<Timestamp>,
        assigned_user_id: Option<&str>,
    ) -> Result<TodoTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO todo_tasks \
                 (todo_list_id, title, description, status_id, due_date, assigned_user_id) \
             VALUES ($1, $2, $3, COALESCE($4, $5), $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoTask>(&query)
            .bind(todo_list_id)
            .bind(title)
            .bind(description)
            .bind(status_id)
            .bind(TaskStatus::Pending.as_id())
            .bind(due_date)
            .bind(assigned_user_id)
            .fetch_one(pool)
            .await
    }

    /// Load a task together with its owning list.
    pub async fn find_with_list(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TaskWithList>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM todo_tasks t \
             JOIN todo_lists l ON l.id = t.todo_list_id \
             WHERE t.id = $1"
        );
        sqlx::query_as::<_, TaskWithList>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All tasks in a list, creation order.
    pub async fn list_for_list(pool: &PgPool, todo_list_id: DbId) -> Result<Vec<TodoTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM todo_tasks \
             WHERE todo_list_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, TodoTask>(&query)
            .bind(todo_list_id)
            .fetch_all(pool)
            .await
    }

    /// Optimistic full-replace of the four mutable fields.
    ///
    /// Returns `None` when the row is gone or the version is stale;
    /// the caller re-fetches to tell the two apart.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_fields(
        pool: &PgPool,
        id: DbId,
        title: &str,
        description: Option<&str>,
        status_id: i16,
        due_date: Option<Timestamp>,
        expected_version: i64,
    ) -> Result<Option<TodoTask>, sqlx::Error> {
        let query = format!(
            "UPDATE todo_tasks \
             SET title = $3, description = $4, status_id = $5, due_date = $6, \
                 version = version + 1 \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoTask>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(title)
            .bind(description)
            .bind(status_id)
            .bind(due_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task by id. Returns `true` if a row was deleted.
    ///
    /// Ownership is verified by the caller against the loaded row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todo_tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set a task's status with the access predicate folded into the
    /// statement: only the list owner or the assignee can hit the row.
    ///
    /// Returns `true` if a row was updated.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
        status_id: i16,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE todo_tasks AS t \
             SET status_id = $3, version = t.version + 1 \
             FROM todo_lists AS l \
             WHERE t.id = $1 \
               AND l.id = t.todo_list_id \
               AND (l.owner_id = $2 OR t.assigned_user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .bind(status_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Toggle assignment for `user_id` in one atomic statement:
    /// assigned-to-caller clears, anything else assigns the caller.
    ///
    /// Returns the updated row, or `None` if the task is gone.
    pub async fn toggle_assignment(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<TodoTask>, sqlx::Error> {
        let query = format!(
            "UPDATE todo_tasks \
             SET assigned_user_id = CASE WHEN assigned_user_id = $2 THEN NULL ELSE $2 END, \
                 version = version + 1 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoTask>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Tasks assigned to a user, optionally restricted to a status set
    /// and ordered by the given sort key.
    pub async fn list_assigned(
        pool: &PgPool,
        user_id: &str,
        allowed_status_ids: Option<&[i16]>,
        sort: TaskSortKey,
    ) -> Result<Vec<TodoTask>, sqlx::Error> {
        let order_clause = match sort {
            TaskSortKey::DueDate => "due_date ASC NULLS LAST, created_at ASC",
            TaskSortKey::Title => "title ASC, created_at ASC",
        };
        let query = format!(
            "SELECT {COLUMNS} FROM todo_tasks \
             WHERE assigned_user_id = $1 \
               AND ($2::SMALLINT[] IS NULL OR status_id = ANY($2)) \
             ORDER BY {order_clause}"
        );
        sqlx::query_as::<_, TodoTask>(&query)
            .bind(user_id)
            .bind(allowed_status_ids)
            .fetch_all(pool)
            .await
    }

    /// Search tasks visible to a user (list owner or assignee).
    ///
    /// A term substring-matches the title, case-sensitively. Tag ids
    /// use AND semantics: the task must carry every listed tag.
    pub async fn search(
        pool: &PgPool,
        user_id: &str,
        term: Option<&str>,
        tag_ids: Option<&[DbId]>,
    ) -> Result<Vec<TaskWithList>, sqlx::Error> {
        let tag_count = tag_ids.map_or(0, |ids| ids.len()) as i64;
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM todo_tasks t \
             JOIN todo_lists l ON l.id = t.todo_list_id \
             WHERE (l.owner_id = $1 OR t.assigned_user_id = $1) \
               AND ($2::TEXT IS NULL OR POSITION($2 IN t.title) > 0) \
               AND ($3::BIGINT[] IS NULL OR t.id IN ( \
                       SELECT todo_task_id FROM task_tags \
                       WHERE tag_id = ANY($3) \
                       GROUP BY todo_task_id \
                       HAVING COUNT(DISTINCT tag_id) = $4)) \
             ORDER BY t.created_at ASC, t.id ASC"
        );
        sqlx::query_as::<_, TaskWithList>(&query)
            .bind(user_id)
            .bind(term)
            .bind(tag_ids)
            .bind(tag_count)
            .fetch_all(pool)
            .await
    }

    /// Bounded search variant for incremental-search UIs: same scope
    /// and filters as [`Self::search`], capped at ten rows, with the
    /// overdue flag computed in the query.
    pub async fn search_preview(
        pool: &PgPool,
        user_id: &str,
        term: Option<&str>,
        tag_ids: Option<&[DbId]>,
    ) -> Result<Vec<TaskSearchRow>, sqlx::Error> {
        let tag_count = tag_ids.map_or(0, |ids| ids.len()) as i64;
        sqlx::query_as::<_, TaskSearchRow>(
            "SELECT t.id, t.title, t.status_id, t.due_date, \
                    (t.due_date IS NOT NULL \
                       AND t.due_date < NOW() \
                       AND t.status_id <> $5) AS is_overdue, \
                    l.title AS list_title \
             FROM todo_tasks t \
             JOIN todo_lists l ON l.id = t.todo_list_id \
             WHERE (l.owner_id = $1 OR t.assigned_user_id = $1) \
               AND ($2::TEXT IS NULL OR POSITION($2 IN t.title) > 0) \
               AND ($3::BIGINT[] IS NULL OR t.id IN ( \
                       SELECT todo_task_id FROM task_tags \
                       WHERE tag_id = ANY($3) \
                       GROUP BY todo_task_id \
                       HAVING COUNT(DISTINCT tag_id) = $4)) \
             ORDER BY t.created_at ASC, t.id ASC \
             LIMIT $6",
        )
        .bind(user_id)
        .bind(term)
        .bind(tag_ids)
        .bind(tag_count)
        .bind(TaskStatus::Completed.as_id())
        .bind(PREVIEW_LIMIT)
        .fetch_all(pool)
        .await
    }

    /// Tasks visible to a user that carry the given tag, creation order.
    pub async fn list_visible_by_tag(
        pool: &PgPool,
        user_id: &str,
        tag_id: DbId,
    ) -> Result<Vec<TaskWithList>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM todo_tasks t \
             JOIN todo_lists l ON l.id = t.todo_list_id \
             JOIN task_tags tt ON tt.todo_task_id = t.id \
             WHERE tt.tag_id = $2 \
               AND (l.owner_id = $1 OR t.assigned_user_id = $1) \
             ORDER BY t.created_at ASC, t.id ASC"
        );
        sqlx::query_as::<_, TaskWithList>(&query)
            .bind(user_id)
            .bind(tag_id)
            .fetch_all(pool)
            .await
    }
}
