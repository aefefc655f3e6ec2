//! Route definitions for the list service, mounted at `/lists`.
//!
//! ```text
//! GET    /              -> list_all
//! POST   /              -> create
//! GET    /{id}          -> get_by_id
//! PUT    /{id}          -> update
//! DELETE /{id}          -> delete
//! GET    /{id}/tasks    -> list_tasks (tasks + tags + status counts)
//! POST   /{id}/tasks    -> create_task
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::lists;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lists::list_all).post(lists::create))
        .route(
            "/{id}",
            get(lists::get_by_id)
                .put(lists::update)
                .delete(lists::delete),
        )
        .route("/{id}/tasks", get(lists::list_tasks).post(lists::create_task))
}
