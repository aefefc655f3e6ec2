pub mod health;
pub mod lists;
pub mod tags;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /lists                        list, create
/// /lists/{id}                   get, rename, delete
/// /lists/{id}/tasks             tasks with tags + counts, create task
///
/// /tasks/assigned               caller's assigned tasks (?status=&sort=)
/// /tasks/search                 search with tag facets (?term=&tag_ids=)
/// /tasks/search/preview         capped preview, fails open when unauthenticated
/// /tasks/{id}                   detail, full update, delete
/// /tasks/{id}/status            status change (PUT)
/// /tasks/{id}/assignment        assignment toggle (POST)
/// /tasks/{id}/tags              attach tag by name (POST)
/// /tasks/{id}/tags/{tag_id}     detach tag (DELETE)
/// /tasks/{id}/comments          list, post
///
/// /tags                         list, create
/// /tags/counts                  tags with visible-task counts
/// /tags/{id}/tasks              visible tasks carrying the tag
/// /tags/{id}                    delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // List service (owner-only resources).
        .nest("/lists", lists::router())
        // Task service, including task-scoped tag links and comments.
        .nest("/tasks", tasks::router())
        // Tag service (shared across users).
        .nest("/tags", tags::router())
}
