//! Handlers for the `/tasks` resource.
//!
//! Task reads, edits and status moves are open to the list owner and
//! the assignee; deletion and assignment changes are owner-only. A
//! failed check surfaces as 404, exactly like a missing row.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use taskhive_core::access;
use taskhive_core::duedate;
use taskhive_core::error::CoreError;
use taskhive_core::status::{StatusFilter, TaskSortKey, TaskStatus};
use taskhive_core::types::DbId;
use taskhive_core::validate::{self, MAX_TASK_TITLE_LEN};
use taskhive_db::models::comment::CommentWithAuthor;
use taskhive_db::models::tag::{Tag, TagSummary};
use taskhive_db::models::todo_task::{
    AssignedTasksParams, SearchParams, TaskWithList, TodoTask, UpdateTaskStatus, UpdateTodoTask,
};
use taskhive_db::repositories::{CommentRepo, TagRepo, TaskRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::tags_by_task;
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Full task payload for the detail endpoint: the task with its list
/// context, tags, comments, and the assignee's display name.
#[derive(Debug, Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: TaskWithList,
    pub status: TaskStatus,
    pub tags: Vec<Tag>,
    pub comments: Vec<CommentWithAuthor>,
    pub assignee_name: Option<String>,
}

/// An assigned-tasks row with its decoded status.
#[derive(Debug, Serialize)]
pub struct AssignedTask {
    #[serde(flatten)]
    pub task: TodoTask,
    pub status: TaskStatus,
}

/// A task with list context, decoded status and tags, as returned by
/// the search and tag-browse endpoints.
#[derive(Debug, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: TaskWithList,
    pub status: TaskStatus,
    pub tags: Vec<TagSummary>,
}

/// Search results plus the caller's visible tag facets for the
/// filter sidebar.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub tasks: Vec<TaskView>,
    pub tags: Vec<Tag>,
}

/// Lean row for the incremental-search dropdown. The due date is
/// pre-formatted as a local calendar date.
#[derive(Debug, Serialize)]
pub struct SearchPreviewItem {
    pub id: DbId,
    pub title: String,
    pub status: TaskStatus,
    pub due_date: Option<String>,
    pub is_overdue: bool,
    pub list_title: String,
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TaskDetail>>> {
    let task = TaskRepo::find_with_list(&state.pool, id)
        .await?
        .filter(|t| {
            access::can_access_task(&t.owner_id, t.assigned_user_id.as_deref(), &auth.user_id)
        })
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoTask",
            id,
        }))?;

    let tags = TagRepo::tags_for_task(&state.pool, id).await?;
    let comments = CommentRepo::list_for_task(&state.pool, id).await?;
    let assignee_name = match task.assigned_user_id.as_deref() {
        Some(user_id) => UserRepo::find_by_id(&state.pool, user_id)
            .await?
            .map(|u| u.display_name),
        None => None,
    };

    Ok(Json(DataResponse {
        data: TaskDetail {
            status: task.status(),
            task,
            tags,
            comments,
            assignee_name,
        },
    }))
}

/// PUT /api/v1/tasks/{id}
///
/// Full replace of the four mutable fields. The creation timestamp
/// and the owning list never change; an absent due date clears the
/// column. Optimistic: one retry against the fresh version, then 409.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTodoTask>,
) -> AppResult<Json<DataResponse<TodoTask>>> {
    let title = validate::required_trimmed("Title", &input.title, MAX_TASK_TITLE_LEN)?;
    let description = input
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    let due_date = input
        .due_date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(duedate::parse_local)
        .transpose()?;
    let status_id = input.status.as_id();

    let task = TaskRepo::find_with_list(&state.pool, id)
        .await?
        .filter(|t| {
            access::can_access_task(&t.owner_id, t.assigned_user_id.as_deref(), &auth.user_id)
        })
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoTask",
            id,
        }))?;

    if let Some(updated) = TaskRepo::update_fields(
        &state.pool,
        id,
        &title,
        description,
        status_id,
        due_date,
        task.version,
    )
    .await?
    {
        tracing::info!(task_id = id, user_id = %auth.user_id, "Task updated");
        return Ok(Json(DataResponse { data: updated }));
    }

    // Stale version. Re-fetch, re-checking access against the fresh
    // row, and retry once.
    let fresh = TaskRepo::find_with_list(&state.pool, id)
        .await?
        .filter(|t| {
            access::can_access_task(&t.owner_id, t.assigned_user_id.as_deref(), &auth.user_id)
        })
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoTask",
            id,
        }))?;

    let updated = TaskRepo::update_fields(
        &state.pool,
        id,
        &title,
        description,
        status_id,
        due_date,
        fresh.version,
    )
    .await?
    .ok_or(AppError::Core(CoreError::Conflict(format!(
        "TodoTask {id} was modified concurrently"
    ))))?;

    tracing::info!(task_id = id, user_id = %auth.user_id, "Task updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/tasks/{id}
///
/// Owner only; an assignee cannot delete the task off someone's list.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let task = TaskRepo::find_with_list(&state.pool, id)
        .await?
        .filter(|t| access::is_list_owner(&t.owner_id, &auth.user_id))
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoTask",
            id,
        }))?;

    if !TaskRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TodoTask",
            id,
        }));
    }

    tracing::info!(task_id = id, list_id = task.todo_list_id, user_id = %auth.user_id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/tasks/{id}/status
///
/// Any status is reachable from any status. The owner-or-assignee
/// predicate is folded into the update, so a denied caller sees the
/// same 404 as a missing row.
pub async fn set_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTaskStatus>,
) -> AppResult<StatusCode> {
    let updated =
        TaskRepo::set_status(&state.pool, id, &auth.user_id, input.status.as_id()).await?;

    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TodoTask",
            id,
        }));
    }

    tracing::info!(
        task_id = id,
        status = input.status.label(),
        user_id = %auth.user_id,
        "Task status changed"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/tasks/{id}/assignment
///
/// Owner only. Assigned-to-caller clears, anything else assigns the
/// caller; there is a single assignee slot.
pub async fn toggle_assignment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TodoTask>>> {
    TaskRepo::find_with_list(&state.pool, id)
        .await?
        .filter(|t| access::is_list_owner(&t.owner_id, &auth.user_id))
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoTask",
            id,
        }))?;

    UserRepo::ensure(&state.pool, &auth.user_id, auth.display_name.as_deref()).await?;
    let task = TaskRepo::toggle_assignment(&state.pool, id, &auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoTask",
            id,
        }))?;

    tracing::info!(
        task_id = id,
        assigned = task.assigned_user_id.is_some(),
        user_id = %auth.user_id,
        "Task assignment toggled"
    );

    Ok(Json(DataResponse { data: task }))
}

/// GET /api/v1/tasks/assigned?status=&sort=
///
/// The caller's assigned tasks. `status` defaults to active
/// (pending + in progress); `sort` defaults to due date with undated
/// tasks last.
pub async fn assigned(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AssignedTasksParams>,
) -> AppResult<Json<DataResponse<Vec<AssignedTask>>>> {
    let filter = StatusFilter::parse(params.status.as_deref());
    let sort = TaskSortKey::parse(params.sort.as_deref());

    let allowed = filter.allowed_ids();
    let tasks = TaskRepo::list_assigned(&state.pool, &auth.user_id, allowed.as_deref(), sort)
        .await?
        .into_iter()
        .map(|task| AssignedTask {
            status: task.status(),
            task,
        })
        .collect();

    Ok(Json(DataResponse { data: tasks }))
}

/// GET /api/v1/tasks/search?term=&tag_ids=
///
/// Scope: tasks on the caller's own lists plus tasks assigned to the
/// caller. A term substring-matches the title (store collation, so
/// case-sensitive); tag ids must all be present on a match.
pub async fn search(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<SearchResults>>> {
    let term = params.term.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let tag_ids = parse_tag_ids(params.tag_ids.as_deref());

    let rows = TaskRepo::search(&state.pool, &auth.user_id, term, tag_ids.as_deref()).await?;
    let facets = TagRepo::visible_for_user(&state.pool, &auth.user_id).await?;

    let task_ids: Vec<DbId> = rows.iter().map(|t| t.id).collect();
    let mut tags = tags_by_task(TagRepo::tags_for_tasks(&state.pool, &task_ids).await?);

    let tasks = rows
        .into_iter()
        .map(|task| TaskView {
            status: task.status(),
            tags: tags.remove(&task.id).unwrap_or_default(),
            task,
        })
        .collect();

    Ok(Json(DataResponse {
        data: SearchResults {
            tasks,
            tags: facets,
        },
    }))
}

/// GET /api/v1/tasks/search/preview?term=&tag_ids=
///
/// Bounded variant for the search box, capped at ten rows. Unlike
/// every other endpoint this fails open: without a usable token it
/// returns an empty collection instead of a 401, so a stale session
/// degrades quietly while typing.
pub async fn search_preview(
    OptionalAuthUser(auth): OptionalAuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<SearchPreviewItem>>>> {
    let Some(auth) = auth else {
        return Ok(Json(DataResponse { data: Vec::new() }));
    };

    let term = params.term.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let tag_ids = parse_tag_ids(params.tag_ids.as_deref());

    let items = TaskRepo::search_preview(&state.pool, &auth.user_id, term, tag_ids.as_deref())
        .await?
        .into_iter()
        .map(|row| SearchPreviewItem {
            status: row.status(),
            due_date: row.due_date.map(duedate::to_local_display),
            id: row.id,
            title: row.title,
            is_overdue: row.is_overdue,
            list_title: row.list_title,
        })
        .collect();

    Ok(Json(DataResponse { data: items }))
}

/// Parse the comma-separated `tag_ids` query value. Tokens that are
/// not ids are skipped; no usable ids means no tag filter.
pub(crate) fn parse_tag_ids(raw: Option<&str>) -> Option<Vec<DbId>> {
    let ids: Vec<DbId> = raw?
        .split(',')
        .filter_map(|token| token.trim().parse().ok())
        .collect();

    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::parse_tag_ids;

    #[test]
    fn tag_ids_parse_and_skip_garbage() {
        assert_eq!(parse_tag_ids(Some("1,2,3")), Some(vec![1, 2, 3]));
        assert_eq!(parse_tag_ids(Some(" 4 , x, 5 ")), Some(vec![4, 5]));
        assert_eq!(parse_tag_ids(Some("x,,")), None);
        assert_eq!(parse_tag_ids(Some("")), None);
        assert_eq!(parse_tag_ids(None), None);
    }
}
