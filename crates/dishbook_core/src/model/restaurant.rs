//! Restaurant record and its write-side shapes.
//!
//! # Invariants
//! - `id` and `registered_at` never change after creation.
//! - `dishes` is the owning collection, in insertion order.

use crate::model::dish::Dish;
use crate::model::validation::{require_name, require_timestamp_order, ValidationError};
use crate::model::{normalize_optional_text, EpochMillis};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type RestaurantId = Uuid;

/// Snapshot of one restaurant with its owned dishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    /// Conventionally a restaurant-kind category name. Empty means unset.
    pub genre: String,
    pub address: String,
    pub url: Option<String>,
    /// Local file reference.
    pub image_path: Option<String>,
    pub registered_at: EpochMillis,
    pub updated_at: EpochMillis,
    pub is_favorite: bool,
    pub memo: Option<String>,
    pub visit_count: u32,
    pub business_hours: Option<String>,
    pub dishes: Vec<Dish>,
}

impl Restaurant {
    /// Builds a new record from a draft, stamping both timestamps with `now`.
    pub fn from_draft(draft: RestaurantDraft, now: EpochMillis) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            genre: draft.genre.trim().to_string(),
            address: draft.address.trim().to_string(),
            url: normalize_optional_text(draft.url),
            image_path: normalize_optional_text(draft.image_path),
            registered_at: now,
            updated_at: now,
            is_favorite: draft.is_favorite,
            memo: normalize_optional_text(draft.memo),
            visit_count: draft.visit_count,
            business_hours: normalize_optional_text(draft.business_hours),
            dishes: Vec::new(),
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name("restaurant", &self.name)?;
        require_timestamp_order(self.registered_at, self.updated_at)?;
        for dish in &self.dishes {
            dish.validate()?;
        }
        Ok(())
    }

    /// Advances `updated_at` to `now` without ever moving it backwards.
    pub fn touch(&mut self, now: EpochMillis) {
        self.updated_at = self.updated_at.max(now);
    }
}

/// Caller-supplied fields for creating a restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantDraft {
    pub name: String,
    pub genre: String,
    pub address: String,
    pub url: Option<String>,
    pub image_path: Option<String>,
    pub is_favorite: bool,
    pub memo: Option<String>,
    pub visit_count: u32,
    pub business_hours: Option<String>,
}

impl RestaurantDraft {
    pub fn new(
        name: impl Into<String>,
        genre: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            genre: genre.into(),
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name("restaurant", &self.name)
    }
}

/// Partial edit of a restaurant. `None` leaves a field untouched.
///
/// Optional text fields take `Some(None)` to clear the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantPatch {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub address: Option<String>,
    pub url: Option<Option<String>>,
    pub image_path: Option<Option<String>>,
    pub is_favorite: Option<bool>,
    pub memo: Option<Option<String>>,
    pub visit_count: Option<u32>,
    pub business_hours: Option<Option<String>>,
}

impl RestaurantPatch {
    /// Applies present fields onto `target`. Timestamps are left to the caller.
    pub fn apply_to(&self, target: &mut Restaurant) {
        if let Some(name) = &self.name {
            target.name = name.trim().to_string();
        }
        if let Some(genre) = &self.genre {
            target.genre = genre.trim().to_string();
        }
        if let Some(address) = &self.address {
            target.address = address.trim().to_string();
        }
        if let Some(url) = &self.url {
            target.url = normalize_optional_text(url.clone());
        }
        if let Some(image_path) = &self.image_path {
            target.image_path = normalize_optional_text(image_path.clone());
        }
        if let Some(is_favorite) = self.is_favorite {
            target.is_favorite = is_favorite;
        }
        if let Some(memo) = &self.memo {
            target.memo = normalize_optional_text(memo.clone());
        }
        if let Some(visit_count) = self.visit_count {
            target.visit_count = visit_count;
        }
        if let Some(business_hours) = &self.business_hours {
            target.business_hours = normalize_optional_text(business_hours.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Restaurant, RestaurantDraft, RestaurantPatch};
    use crate::model::validation::ValidationError;

    #[test]
    fn from_draft_sets_equal_timestamps_and_defaults() {
        let restaurant =
            Restaurant::from_draft(RestaurantDraft::new("Sushi Taro", "和食", "Tokyo"), 1_000)
                .unwrap();
        assert_eq!(restaurant.registered_at, 1_000);
        assert_eq!(restaurant.updated_at, 1_000);
        assert_eq!(restaurant.visit_count, 0);
        assert!(!restaurant.is_favorite);
        assert!(restaurant.dishes.is_empty());
    }

    #[test]
    fn from_draft_rejects_blank_name() {
        let err = Restaurant::from_draft(RestaurantDraft::new(" ", "和食", "Tokyo"), 1).unwrap_err();
        assert_eq!(err, ValidationError::EmptyName { record: "restaurant" });
    }

    #[test]
    fn patch_can_clear_optional_text() {
        let mut draft = RestaurantDraft::new("Bistro", "フレンチ", "Osaka");
        draft.memo = Some("terrace seats".to_string());
        let mut restaurant = Restaurant::from_draft(draft, 5).unwrap();

        let patch = RestaurantPatch {
            memo: Some(None),
            visit_count: Some(3),
            ..RestaurantPatch::default()
        };
        patch.apply_to(&mut restaurant);

        assert!(restaurant.memo.is_none());
        assert_eq!(restaurant.visit_count, 3);
        assert_eq!(restaurant.name, "Bistro");
    }

    #[test]
    fn touch_never_moves_backwards() {
        let mut restaurant =
            Restaurant::from_draft(RestaurantDraft::new("Cafe", "カフェ", ""), 100).unwrap();
        restaurant.touch(50);
        assert_eq!(restaurant.updated_at, 100);
        restaurant.touch(150);
        assert_eq!(restaurant.updated_at, 150);
    }
}
