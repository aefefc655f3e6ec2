//! Request handlers for the list, task, tag and comment services.
//!
//! Each submodule provides async handler functions for one service.
//! Handlers authenticate via `AuthUser`, rerun the visibility rules
//! from `taskhive_core::access` against loaded rows, delegate to the
//! repositories in `taskhive_db` and map errors via `AppError`.

use std::collections::HashMap;

use taskhive_core::types::DbId;
use taskhive_db::models::tag::{TagSummary, TaskTagRow};

pub mod comments;
pub mod lists;
pub mod tags;
pub mod tasks;

/// Group a bulk tag fetch by task id, for decorating a page of tasks
/// with one query instead of one per row.
pub(crate) fn tags_by_task(rows: Vec<TaskTagRow>) -> HashMap<DbId, Vec<TagSummary>> {
    let mut by_task: HashMap<DbId, Vec<TagSummary>> = HashMap::new();
    for row in rows {
        by_task.entry(row.todo_task_id).or_default().push(row.into());
    }
    by_task
}
