//! Handlers for task comments. Append-only: comments can be posted
//! and listed, never edited or removed.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskhive_core::access;
use taskhive_core::error::CoreError;
use taskhive_core::types::DbId;
use taskhive_core::validate;
use taskhive_db::models::comment::{Comment, CommentWithAuthor, CreateComment};
use taskhive_db::repositories::{CommentRepo, TaskRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/tasks/{id}/comments
///
/// The author is always the caller; the posted timestamp is now.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    let content = validate::required_text("Comment content", &input.content)?;

    TaskRepo::find_with_list(&state.pool, id)
        .await?
        .filter(|t| {
            access::can_access_task(&t.owner_id, t.assigned_user_id.as_deref(), &auth.user_id)
        })
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoTask",
            id,
        }))?;

    UserRepo::ensure(&state.pool, &auth.user_id, auth.display_name.as_deref()).await?;
    let comment = CommentRepo::create(&state.pool, id, &auth.user_id, &content).await?;

    tracing::info!(comment_id = comment.id, task_id = id, user_id = %auth.user_id, "Comment posted");

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// GET /api/v1/tasks/{id}/comments
///
/// All comments on the task with author names, oldest first.
pub async fn list_for_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CommentWithAuthor>>>> {
    TaskRepo::find_with_list(&state.pool, id)
        .await?
        .filter(|t| {
            access::can_access_task(&t.owner_id, t.assigned_user_id.as_deref(), &auth.user_id)
        })
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TodoTask",
            id,
        }))?;

    let comments = CommentRepo::list_for_task(&state.pool, id).await?;

    Ok(Json(DataResponse { data: comments }))
}
