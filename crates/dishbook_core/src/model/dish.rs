//! Dish record and its write-side shapes.

use crate::model::restaurant::RestaurantId;
use crate::model::validation::{require_name, require_timestamp_order, ValidationError};
use crate::model::{normalize_optional_text, EpochMillis};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type DishId = Uuid;

pub const DEFAULT_SCORE: u8 = 50;
pub const MAX_SCORE: u8 = 100;

/// Snapshot of one dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: DishId,
    /// Owning restaurant, derived from the owning collection.
    pub restaurant_id: RestaurantId,
    pub name: String,
    /// Conventionally a dish-kind category name. Empty means unset.
    pub category: String,
    /// Personal rating in `0..=100`.
    pub score: u8,
    pub memo: Option<String>,
    /// Currency-agnostic minor units.
    pub price: u32,
    pub is_favorite: bool,
    pub registered_at: EpochMillis,
    pub updated_at: EpochMillis,
    pub order_count: u32,
    pub image_path: Option<String>,
}

impl Dish {
    /// Builds a new dish owned by `restaurant_id`, stamping both timestamps.
    pub fn from_draft(
        draft: DishDraft,
        restaurant_id: RestaurantId,
        now: EpochMillis,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            restaurant_id,
            name: draft.name.trim().to_string(),
            category: draft.category.trim().to_string(),
            score: draft.score,
            memo: normalize_optional_text(draft.memo),
            price: draft.price,
            is_favorite: draft.is_favorite,
            registered_at: now,
            updated_at: now,
            order_count: draft.order_count,
            image_path: normalize_optional_text(draft.image_path),
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name("dish", &self.name)?;
        require_score(self.score)?;
        require_order_count(self.order_count)?;
        require_timestamp_order(self.registered_at, self.updated_at)
    }

    pub fn touch(&mut self, now: EpochMillis) {
        self.updated_at = self.updated_at.max(now);
    }
}

/// Caller-supplied fields for creating a dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishDraft {
    pub name: String,
    pub category: String,
    pub score: u8,
    pub memo: Option<String>,
    pub price: u32,
    pub is_favorite: bool,
    pub order_count: u32,
    pub image_path: Option<String>,
}

impl DishDraft {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            score: DEFAULT_SCORE,
            memo: None,
            price: 0,
            is_favorite: false,
            order_count: 1,
            image_path: None,
        }
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }

    pub fn with_score(mut self, score: u8) -> Self {
        self.score = score;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name("dish", &self.name)?;
        require_score(self.score)?;
        require_order_count(self.order_count)
    }
}

impl Default for DishDraft {
    fn default() -> Self {
        Self::new("", "")
    }
}

/// Partial edit of a dish. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub score: Option<u8>,
    pub memo: Option<Option<String>>,
    pub price: Option<u32>,
    pub is_favorite: Option<bool>,
    pub order_count: Option<u32>,
    pub image_path: Option<Option<String>>,
}

impl DishPatch {
    pub fn apply_to(&self, target: &mut Dish) {
        if let Some(name) = &self.name {
            target.name = name.trim().to_string();
        }
        if let Some(category) = &self.category {
            target.category = category.trim().to_string();
        }
        if let Some(score) = self.score {
            target.score = score;
        }
        if let Some(memo) = &self.memo {
            target.memo = normalize_optional_text(memo.clone());
        }
        if let Some(price) = self.price {
            target.price = price;
        }
        if let Some(is_favorite) = self.is_favorite {
            target.is_favorite = is_favorite;
        }
        if let Some(order_count) = self.order_count {
            target.order_count = order_count;
        }
        if let Some(image_path) = &self.image_path {
            target.image_path = normalize_optional_text(image_path.clone());
        }
    }
}

fn require_score(score: u8) -> Result<(), ValidationError> {
    if score > MAX_SCORE {
        return Err(ValidationError::ScoreOutOfRange(score));
    }
    Ok(())
}

fn require_order_count(order_count: u32) -> Result<(), ValidationError> {
    if order_count == 0 {
        return Err(ValidationError::OrderCountZero);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Dish, DishDraft, DishPatch, DEFAULT_SCORE};
    use crate::model::validation::ValidationError;
    use uuid::Uuid;

    #[test]
    fn draft_defaults_follow_entry_form() {
        let draft = DishDraft::new("Toro Nigiri", "メイン");
        assert_eq!(draft.score, DEFAULT_SCORE);
        assert_eq!(draft.order_count, 1);
        assert_eq!(draft.price, 0);
    }

    #[test]
    fn validation_rejects_out_of_range_score_and_zero_orders() {
        let err = DishDraft::new("Ramen", "メイン")
            .with_score(101)
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::ScoreOutOfRange(101));

        let mut draft = DishDraft::new("Ramen", "メイン");
        draft.order_count = 0;
        assert_eq!(draft.validate().unwrap_err(), ValidationError::OrderCountZero);
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let owner = Uuid::new_v4();
        let mut dish = Dish::from_draft(
            DishDraft::new("Gyoza", "サイド").with_price(500),
            owner,
            10,
        )
        .unwrap();

        DishPatch {
            score: Some(75),
            ..DishPatch::default()
        }
        .apply_to(&mut dish);

        assert_eq!(dish.score, 75);
        assert_eq!(dish.price, 500);
        assert_eq!(dish.restaurant_id, owner);
    }
}
