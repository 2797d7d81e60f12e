//! Category tags used to populate genre/category pickers and filter chips.

use crate::model::validation::{require_name, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CategoryId = Uuid;

/// Which record kind a category applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Restaurant genre (`Restaurant::genre`).
    Restaurant,
    /// Dish category (`Dish::category`).
    Dish,
}

impl CategoryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Dish => "dish",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "restaurant" => Some(Self::Restaurant),
            "dish" => Some(Self::Dish),
            _ => None,
        }
    }
}

/// Flat name tag. Not referenced by id from restaurants or dishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

impl Category {
    /// Creates a category with a generated id and a trimmed name.
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Result<Self, ValidationError> {
        let name = name.into();
        require_name("category", &name)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            kind,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name("category", &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CategoryKind};

    #[test]
    fn kind_text_encoding_is_reversible() {
        for kind in [CategoryKind::Restaurant, CategoryKind::Dish] {
            assert_eq!(CategoryKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(CategoryKind::parse("drink"), None);
    }

    #[test]
    fn new_rejects_blank_name() {
        assert!(Category::new("  ", CategoryKind::Dish).is_err());
        let category = Category::new(" カフェ ", CategoryKind::Restaurant).unwrap();
        assert_eq!(category.name, "カフェ");
    }
}
