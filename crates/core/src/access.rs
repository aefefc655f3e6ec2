//! Task and list visibility rules.
//!
//! A task is reachable by the owner of its list and by the user it is
//! assigned to. Destructive operations, assignment changes and
//! everything at the list level are owner-only. Denied access is
//! reported as not-found so ids cannot be probed.

pub fn is_list_owner(owner_id: &str, user_id: &str) -> bool {
    owner_id == user_id
}

/// Owner-or-assignee check used by task reads, edits and status moves.
pub fn can_access_task(owner_id: &str, assigned_user_id: Option<&str>, user_id: &str) -> bool {
    is_list_owner(owner_id, user_id) || assigned_user_id == Some(user_id)
}
