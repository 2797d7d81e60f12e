//! Field-level validation errors for catalogue records.

use crate::model::category::CategoryKind;
use crate::model::EpochMillis;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reasons for drafts, patches and persisted snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required name is empty after trimming.
    EmptyName { record: &'static str },
    /// Dish score outside `0..=100`.
    ScoreOutOfRange(u8),
    /// Dish order count must be at least one.
    OrderCountZero,
    /// Genre/category text does not name a known category of that kind.
    UnknownCategory { kind: CategoryKind, name: String },
    /// `updated_at` is earlier than `registered_at`.
    TimestampOrder {
        registered_at: EpochMillis,
        updated_at: EpochMillis,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName { record } => write!(f, "{record} name must not be empty"),
            Self::ScoreOutOfRange(score) => {
                write!(f, "score {score} is outside the allowed range 0..=100")
            }
            Self::OrderCountZero => write!(f, "order count must be at least 1"),
            Self::UnknownCategory { kind, name } => {
                write!(f, "unknown {} category `{name}`", kind.as_str())
            }
            Self::TimestampOrder {
                registered_at,
                updated_at,
            } => write!(
                f,
                "updated_at ({updated_at}) is earlier than registered_at ({registered_at})"
            ),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_name(record: &'static str, name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName { record });
    }
    Ok(())
}

pub(crate) fn require_timestamp_order(
    registered_at: EpochMillis,
    updated_at: EpochMillis,
) -> Result<(), ValidationError> {
    if updated_at < registered_at {
        return Err(ValidationError::TimestampOrder {
            registered_at,
            updated_at,
        });
    }
    Ok(())
}
