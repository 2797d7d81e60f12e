//! Catalogue domain model.
//!
//! # Responsibility
//! - Define the four persisted record kinds and their write-side shapes
//!   (drafts for creation, patches for edits).
//! - Own field-level validation shared by every write path.
//!
//! # Invariants
//! - Every record is identified by a stable UUID that is never reassigned.
//! - `updated_at >= registered_at` for restaurants and dishes.
//! - A dish belongs to exactly one restaurant; the back-reference is
//!   populated from storage, never by callers.

pub mod category;
pub mod dish;
pub mod preferences;
pub mod restaurant;
pub mod validation;

/// Unix epoch milliseconds.
pub type EpochMillis = i64;

/// Trims optional free text and maps blank input to `None`.
///
/// Forms hand over empty strings for untouched optional fields; storing them
/// as absent keeps "unset" in a single representation.
pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|text| {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == text.len() {
            Some(text)
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::normalize_optional_text;

    #[test]
    fn blank_optional_text_becomes_none() {
        assert_eq!(normalize_optional_text(Some("   ".to_string())), None);
        assert_eq!(normalize_optional_text(None), None);
    }

    #[test]
    fn optional_text_is_trimmed() {
        assert_eq!(
            normalize_optional_text(Some("  11:00-22:00 ".to_string())).as_deref(),
            Some("11:00-22:00")
        );
    }
}
