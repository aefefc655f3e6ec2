//! Due-date handling.
//!
//! Due dates arrive as wall-clock strings from a `datetime-local`
//! form input, are stored in UTC, and are rendered back in the
//! server's local timezone.

use chrono::{Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::CoreError;
use crate::status::TaskStatus;
use crate::types::Timestamp;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a wall-clock due date and convert it to UTC.
///
/// Accepts `datetime-local` style values (`2025-06-15T09:30`) and a
/// bare date, which is taken as local midnight. Ambiguous wall-clock
/// times around a DST fold resolve to the earlier instant.
pub fn parse_local(input: &str) -> Result<Timestamp, CoreError> {
    let trimmed = input.trim();
    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| CoreError::Validation(format!("invalid due date: {trimmed:?}")))?;

    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(CoreError::Validation(format!(
            "due date {trimmed:?} does not exist in the local timezone"
        ))),
    }
}

/// Local calendar date for compact listings, e.g. `06/15/2025`.
pub fn to_local_display(ts: Timestamp) -> String {
    ts.with_timezone(&Local).format("%m/%d/%Y").to_string()
}

/// Local wall-clock value suitable for refilling a `datetime-local` input.
pub fn to_local_form_value(ts: Timestamp) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%dT%H:%M").to_string()
}

/// A task is overdue once its due date has passed, unless completed.
pub fn is_overdue(due_date: Option<Timestamp>, status: TaskStatus, now: Timestamp) -> bool {
    match due_date {
        Some(due) => due < now && status != TaskStatus::Completed,
        None => false,
    }
}
