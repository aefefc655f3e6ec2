//! Handlers for the `/lists` resource.
//!
//! Every operation here is owner-only: lists are never shared, only
//! the tasks inside them are (via assignment).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use taskhive_core::duedate;
use taskhive_core::error::CoreError;
use taskhive_core::status::TaskStatus;
use taskhive_core::types::DbId;
use taskhive_core::validate::{self, MAX_LIST_TITLE_LEN, MAX_TASK_TITLE_LEN};
use taskhive_db::models::tag::TagSummary;
use taskhive_db::models::todo_list::{CreateTodoList, StatusCounts, TodoList, UpdateTodoList};
use taskhive_db::models::todo_task::{CreateTodoTask, TodoTask};
use taskhive_db::repositories::{TagRepo, TaskRepo, TodoListRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::tags_by_task;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A task decorated with its decoded status and tags for the list
/// detail payload.
#[derive(Debug, Serialize)]
pub struct ListTask {
    #[serde(flatten)]
    pub task: TodoTask,
    pub status: TaskStatus,
    pub tags: Vec<TagSummary>,
}

/// Payload for `GET /lists/{id}/tasks`: the list, its tasks in
/// creation order, and the status rollup.
#[derive(Debug, Serialize)]
pub struct ListDetail {
    pub list: TodoList,
    pub tasks: Vec<ListTask>,
    pub counts: StatusCounts,
}

/// GET /api/v1/lists
///
/// Lists owned by the caller, oldest first.
pub async fn list_all(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TodoList>>>> {
    let lists = TodoListRepo::list_for_owner(&state.pool, &auth.user_id).await?;

    Ok(Json(DataResponse { data: lists }))
}

/// POST /api/v1/lists
///
/// The owner is always the authenticated caller; the payload cannot
/// name someone else.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTodoList>,
) -> AppResult<(StatusCode, Json<DataResponse<TodoList>>)> {
    let title = validate::required_trimmed("Title", &input.title, MAX_LIST_TITLE_LEN)?;

    UserRepo::ensure(&state.pool, &auth.user_id, auth.display_name.as_deref()).await?;
    let list = TodoListRepo::create(&state.pool, &auth.user_id, &title).await?;

    tracing::info!(list_id = list.id, user_id = %auth.user_id, "List created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: list })))
}

/// GET /api/v1/lists/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TodoList>>> {
    let list = TodoListRepo::find_owned(&state.pool, id, &auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoList",
            id,
        }))?;

    Ok(Json(DataResponse { data: list }))
}

/// PUT /api/v1/lists/{id}
///
/// Optimistic rename: a write that lost a race gets one retry against
/// the fresh version before surfacing 409.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTodoList>,
) -> AppResult<Json<DataResponse<TodoList>>> {
    let title = validate::required_trimmed("Title", &input.title, MAX_LIST_TITLE_LEN)?;

    let list = TodoListRepo::find_owned(&state.pool, id, &auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoList",
            id,
        }))?;

    if let Some(updated) = TodoListRepo::rename(&state.pool, id, &title, list.version).await? {
        tracing::info!(list_id = id, user_id = %auth.user_id, "List renamed");
        return Ok(Json(DataResponse { data: updated }));
    }

    // Stale version. Re-fetch to tell deletion from a racing write,
    // then retry once against whatever version is current.
    let fresh = TodoListRepo::find_owned(&state.pool, id, &auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoList",
            id,
        }))?;

    let updated = TodoListRepo::rename(&state.pool, id, &title, fresh.version)
        .await?
        .ok_or(AppError::Core(CoreError::Conflict(format!(
            "TodoList {id} was modified concurrently"
        ))))?;

    tracing::info!(list_id = id, user_id = %auth.user_id, "List renamed");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/lists/{id}
///
/// Cascades to the list's tasks, their tag links and comments.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TodoListRepo::delete(&state.pool, id, &auth.user_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TodoList",
            id,
        }));
    }

    tracing::info!(list_id = id, user_id = %auth.user_id, "List deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/lists/{id}/tasks
///
/// The list's tasks in creation order, each with its tags, plus the
/// pending/in-progress/completed/overdue counts.
pub async fn list_tasks(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ListDetail>>> {
    let list = TodoListRepo::find_owned(&state.pool, id, &auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoList",
            id,
        }))?;

    let tasks = TaskRepo::list_for_list(&state.pool, id).await?;
    let counts = TodoListRepo::status_counts(&state.pool, id).await?;

    let task_ids: Vec<DbId> = tasks.iter().map(|t| t.id).collect();
    let mut tags = tags_by_task(TagRepo::tags_for_tasks(&state.pool, &task_ids).await?);

    let tasks = tasks
        .into_iter()
        .map(|task| ListTask {
            status: task.status(),
            tags: tags.remove(&task.id).unwrap_or_default(),
            task,
        })
        .collect();

    Ok(Json(DataResponse {
        data: ListDetail { list, tasks, counts },
    }))
}

/// POST /api/v1/lists/{id}/tasks
///
/// Only the list owner can add tasks. The creator starts as the
/// assignee; the due date arrives as a wall-clock string and is
/// stored in UTC.
pub async fn create_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateTodoTask>,
) -> AppResult<(StatusCode, Json<DataResponse<TodoTask>>)> {
    TodoListRepo::find_owned(&state.pool, id, &auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoList",
            id,
        }))?;

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
    let status_id = input.status.map(TaskStatus::as_id);

    UserRepo::ensure(&state.pool, &auth.user_id, auth.display_name.as_deref()).await?;
    let task = TaskRepo::create(
        &state.pool,
        id,
        &title,
        description,
        status_id,
        due_date,
        Some(&auth.user_id),
    )
    .await?;

    tracing::info!(task_id = task.id, list_id = id, user_id = %auth.user_id, "Task created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}
