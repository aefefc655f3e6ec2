//! Handlers for tags and for the task-tag links.
//!
//! Tags are shared across users; visibility filtering only applies to
//! the tasks they decorate. Attach and detach are idempotent.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use taskhive_core::access;
use taskhive_core::error::CoreError;
use taskhive_core::types::DbId;
use taskhive_core::validate;
use taskhive_db::models::tag::{CreateTag, Tag, TagWithCount};
use taskhive_db::repositories::{TagRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::tags_by_task;
use crate::handlers::tasks::TaskView;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload for `GET /tags/{id}/tasks`: the tag and the caller's
/// visible tasks carrying it.
#[derive(Debug, Serialize)]
pub struct TagTasks {
    pub tag: Tag,
    pub tasks: Vec<TaskView>,
}

// ---------------------------------------------------------------------------
// Tag CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/tags
///
/// Every tag, ordered by normalized name. Feeds the tag picker.
pub async fn list_all(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    let tags = TagRepo::list_all(&state.pool).await?;

    Ok(Json(DataResponse { data: tags }))
}

/// GET /api/v1/tags/counts
///
/// Every tag with the number of tasks the caller can see carrying it.
pub async fn counts(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TagWithCount>>>> {
    let tags = TagRepo::list_with_counts(&state.pool, &auth.user_id).await?;

    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/tags
///
/// Explicit creation. A name that normalizes to an existing tag trips
/// `uq_tags_name` and surfaces as 409.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<(StatusCode, Json<DataResponse<Tag>>)> {
    let (name, display_name) = validate::normalize_tag(&input.name)?;

    let tag = TagRepo::create(&state.pool, &name, &display_name).await?;

    tracing::info!(tag_id = tag.id, name = %tag.name, user_id = %auth.user_id, "Tag created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// GET /api/v1/tags/{id}/tasks
///
/// The caller's visible tasks carrying the tag, creation order.
pub async fn tasks_by_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TagTasks>>> {
    let tag = TagRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tag", id }))?;

    let rows = TaskRepo::list_visible_by_tag(&state.pool, &auth.user_id, id).await?;

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
        data: TagTasks { tag, tasks },
    }))
}

/// DELETE /api/v1/tags/{id}
///
/// Removes the tag and its task links everywhere; tasks are untouched.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TagRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Tag", id }));
    }

    tracing::info!(tag_id = id, user_id = %auth.user_id, "Tag deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Task-tag links
// ---------------------------------------------------------------------------

/// POST /api/v1/tasks/{id}/tags
///
/// Find-or-create by normalized name, then link to the task.
/// Re-attaching an already-linked tag succeeds and returns the same
/// tag; the first writer's display casing sticks.
pub async fn attach(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateTag>,
) -> AppResult<(StatusCode, Json<DataResponse<Tag>>)> {
    let (name, display_name) = validate::normalize_tag(&input.name)?;

    TaskRepo::find_with_list(&state.pool, id)
        .await?
        .filter(|t| {
            access::can_access_task(&t.owner_id, t.assigned_user_id.as_deref(), &auth.user_id)
        })
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoTask",
            id,
        }))?;

    let tag = TagRepo::find_or_create(&state.pool, &name, &display_name).await?;
    TagRepo::attach(&state.pool, id, tag.id).await?;

    tracing::info!(task_id = id, tag_id = tag.id, user_id = %auth.user_id, "Tag attached");

    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// DELETE /api/v1/tasks/{id}/tags/{tag_id}
///
/// Unlink a tag from a task. Removing an absent link is a success.
pub async fn detach(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, tag_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    TaskRepo::find_with_list(&state.pool, id)
        .await?
        .filter(|t| {
            access::can_access_task(&t.owner_id, t.assigned_user_id.as_deref(), &auth.user_id)
        })
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoTask",
            id,
        }))?;

    TagRepo::detach(&state.pool, id, tag_id).await?;

    tracing::info!(task_id = id, tag_id, user_id = %auth.user_id, "Tag detached");

    Ok(StatusCode::NO_CONTENT)
}
