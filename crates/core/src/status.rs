//! Task status lifecycle and the query-string filters built on it.
//!
//! Status ids must match the seed data in the `task_statuses` migration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// The `task_statuses.id` value backing this status.
    pub const fn as_id(self) -> i16 {
        match self {
            TaskStatus::Pending => 1,
            TaskStatus::InProgress => 2,
            TaskStatus::Completed => 3,
        }
    }

    pub const fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(TaskStatus::Pending),
            2 => Some(TaskStatus::InProgress),
            3 => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Exact status name match; anything else is not a status.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Pending" => Some(TaskStatus::Pending),
            "InProgress" => Some(TaskStatus::InProgress),
            "Completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// Status filter parsed from the `status` query parameter of the
/// assigned-tasks listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Pending and in-progress tasks only (the default).
    Active,
    /// No status restriction.
    All,
    /// Exactly one status.
    Only(TaskStatus),
}

impl StatusFilter {
    /// Absent and `"Active"` select active tasks; `"All"` and any
    /// unrecognized value lift the restriction; an exact status name
    /// selects that status alone.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("Active") => StatusFilter::Active,
            Some("All") => StatusFilter::All,
            Some(other) => match TaskStatus::parse(other) {
                Some(status) => StatusFilter::Only(status),
                None => StatusFilter::All,
            },
        }
    }

    /// Status ids admitted by this filter, or `None` when unrestricted.
    pub fn allowed_ids(self) -> Option<Vec<i16>> {
        match self {
            StatusFilter::Active => Some(vec![
                TaskStatus::Pending.as_id(),
                TaskStatus::InProgress.as_id(),
            ]),
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(vec![status.as_id()]),
        }
    }
}

/// Sort key parsed from the `sort` query parameter of the
/// assigned-tasks listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSortKey {
    /// Due date ascending, undated tasks last.
    #[default]
    DueDate,
    /// Title, lexicographic.
    Title,
}

impl TaskSortKey {
    /// `"Title"` sorts by title; everything else falls back to the
    /// due-date ordering.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("Title") => TaskSortKey::Title,
            _ => TaskSortKey::DueDate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ids_round_trip() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
        ] {
            assert_eq!(TaskStatus::from_id(status.as_id()), Some(status));
        }
    }

    #[test]
    fn unknown_status_id_is_none() {
        assert_eq!(TaskStatus::from_id(0), None);
        assert_eq!(TaskStatus::from_id(4), None);
    }

    #[test]
    fn status_parse_is_case_sensitive() {
        assert_eq!(TaskStatus::parse("InProgress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("inprogress"), None);
        assert_eq!(TaskStatus::parse("In Progress"), None);
    }

    #[test]
    fn filter_defaults_to_active() {
        assert_eq!(StatusFilter::parse(None), StatusFilter::Active);
        assert_eq!(StatusFilter::parse(Some("Active")), StatusFilter::Active);
    }

    #[test]
    fn filter_all_lifts_restriction() {
        assert_eq!(StatusFilter::parse(Some("All")), StatusFilter::All);
        assert_eq!(StatusFilter::parse(Some("All")).allowed_ids(), None);
    }

    #[test]
    fn filter_exact_status() {
        assert_eq!(
            StatusFilter::parse(Some("Completed")),
            StatusFilter::Only(TaskStatus::Completed)
        );
        assert_eq!(
            StatusFilter::parse(Some("Completed")).allowed_ids(),
            Some(vec![3])
        );
    }

    #[test]
    fn filter_unrecognized_lifts_restriction() {
        assert_eq!(StatusFilter::parse(Some("Done")), StatusFilter::All);
        assert_eq!(StatusFilter::parse(Some("")), StatusFilter::All);
    }

    #[test]
    fn active_filter_admits_pending_and_in_progress() {
        assert_eq!(StatusFilter::Active.allowed_ids(), Some(vec![1, 2]));
    }

    #[test]
    fn sort_defaults_to_due_date() {
        assert_eq!(TaskSortKey::parse(None), TaskSortKey::DueDate);
        assert_eq!(TaskSortKey::parse(Some("DueDate")), TaskSortKey::DueDate);
        assert_eq!(TaskSortKey::parse(Some("nonsense")), TaskSortKey::DueDate);
    }

    #[test]
    fn sort_by_title() {
        assert_eq!(TaskSortKey::parse(Some("Title")), TaskSortKey::Title);
    }
}
