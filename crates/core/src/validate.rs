//! Input validation for user-supplied text fields.
//!
//! Length limits match the column comments in the migrations.

use crate::error::CoreError;

pub const MAX_LIST_TITLE_LEN: usize = 100;
pub const MAX_TASK_TITLE_LEN: usize = 200;
pub const MAX_TAG_NAME_LEN: usize = 50;

/// Trim a required text field with no length bound.
///
/// Whitespace-only input counts as empty.
pub fn required_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trim a required text field and enforce its length bound.
pub fn required_trimmed(field: &str, value: &str, max_len: usize) -> Result<String, CoreError> {
    let trimmed = required_text(field, value)?;
    if trimmed.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(trimmed)
}

/// Normalize a tag name into its `(name, display_name)` pair.
///
/// `name` is the lowercased match key, `display_name` keeps the
/// casing of whoever created the tag first.
pub fn normalize_tag(raw: &str) -> Result<(String, String), CoreError> {
    let display = required_trimmed("tag name", raw, MAX_TAG_NAME_LEN)?;
    let name = display.to_lowercase();
    Ok((name, display))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(
            required_trimmed("title", "  Groceries  ", MAX_LIST_TITLE_LEN).unwrap(),
            "Groceries"
        );
    }

    #[test]
    fn rejects_empty_and_whitespace_only() {
        assert_matches!(
            required_trimmed("title", "", MAX_LIST_TITLE_LEN),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            required_trimmed("title", "   \t ", MAX_LIST_TITLE_LEN),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn enforces_length_bound_after_trimming() {
        let at_limit = "x".repeat(MAX_LIST_TITLE_LEN);
        assert_eq!(
            required_trimmed("title", &at_limit, MAX_LIST_TITLE_LEN).unwrap(),
            at_limit
        );

        let over = "x".repeat(MAX_LIST_TITLE_LEN + 1);
        assert_matches!(
            required_trimmed("title", &over, MAX_LIST_TITLE_LEN),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn unbounded_text_still_requires_content() {
        assert_eq!(required_text("content", " hi ").unwrap(), "hi");
        assert_matches!(required_text("content", "  "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let umlauts = "ü".repeat(MAX_TAG_NAME_LEN);
        assert!(required_trimmed("tag name", &umlauts, MAX_TAG_NAME_LEN).is_ok());
    }

    #[test]
    fn tag_normalization_lowercases_match_key() {
        let (name, display) = normalize_tag("  Urgent  ").unwrap();
        assert_eq!(name, "urgent");
        assert_eq!(display, "Urgent");
    }

    #[test]
    fn tag_normalization_rejects_blank() {
        assert_matches!(normalize_tag("   "), Err(CoreError::Validation(_)));
    }
}
