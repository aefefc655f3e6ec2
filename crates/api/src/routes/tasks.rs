//! Route definitions for the task service, mounted at `/tasks`.
//!
//! Task creation lives under `/lists/{id}/tasks`; everything operating
//! on an existing task, including its tag links and comments, is here.
//!
//! ```text
//! GET    /assigned              -> assigned (?status=&sort=)
//! GET    /search                -> search (?term=&tag_ids=)
//! GET    /search/preview        -> search_preview (fail-open, capped)
//! GET    /{id}                  -> get_by_id
//! PUT    /{id}                  -> update
//! DELETE /{id}                  -> delete
//! PUT    /{id}/status           -> set_status
//! POST   /{id}/assignment       -> toggle_assignment
//! POST   /{id}/tags             -> attach tag by name
//! DELETE /{id}/tags/{tag_id}    -> detach tag
//! GET    /{id}/comments         -> list comments
//! POST   /{id}/comments         -> post comment
//! ```

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{comments, tags, tasks};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assigned", get(tasks::assigned))
        .route("/search", get(tasks::search))
        .route("/search/preview", get(tasks::search_preview))
        .route(
            "/{id}",
            get(tasks::get_by_id)
                .put(tasks::update)
                .delete(tasks::delete),
        )
        .route("/{id}/status", put(tasks::set_status))
        .route("/{id}/assignment", post(tasks::toggle_assignment))
        .route("/{id}/tags", post(tags::attach))
        .route("/{id}/tags/{tag_id}", delete(tags::detach))
        .route(
            "/{id}/comments",
            get(comments::list_for_task).post(comments::create),
        )
}
