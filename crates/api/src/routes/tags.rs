//! Route definitions for the tag service, mounted at `/tags`.
//!
//! The task-scoped attach/detach routes live under `/tasks` with the
//! rest of the task tree.
//!
//! ```text
//! GET    /              -> list_all
//! POST   /              -> create (409 on duplicate)
//! GET    /counts        -> counts (per-caller visible task counts)
//! GET    /{id}/tasks    -> tasks_by_tag
//! DELETE /{id}          -> delete
//! ```

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags::list_all).post(tags::create))
        .route("/counts", get(tags::counts))
        .route("/{id}", delete(tags::delete))
        .route("/{id}/tasks", get(tags::tasks_by_tag))
}
