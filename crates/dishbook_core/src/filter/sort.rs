//! Restaurant list orderings.

use crate::model::preferences::SortOrder;
use crate::model::restaurant::Restaurant;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Ordering applied by `Catalog::list_restaurants`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestaurantSortKey {
    #[default]
    Name,
    /// Newest registration first.
    RegisteredDesc,
    /// Highest average dish score first; restaurants without dishes last.
    AverageScoreDesc,
    /// Most visited first.
    VisitCountDesc,
}

impl From<SortOrder> for RestaurantSortKey {
    fn from(value: SortOrder) -> Self {
        match value {
            SortOrder::Name => Self::Name,
            SortOrder::Date => Self::RegisteredDesc,
            SortOrder::Rating => Self::AverageScoreDesc,
        }
    }
}

/// Mean dish score, or `None` for a restaurant without dishes.
pub fn average_score(restaurant: &Restaurant) -> Option<f64> {
    let (sum, count) = score_totals(restaurant)?;
    Some(sum as f64 / count as f64)
}

/// Stable in-place sort by `key`.
pub fn sort_restaurants(restaurants: &mut [Restaurant], key: RestaurantSortKey) {
    match key {
        RestaurantSortKey::Name => restaurants.sort_by(|a, b| a.name.cmp(&b.name)),
        RestaurantSortKey::RegisteredDesc => {
            restaurants.sort_by(|a, b| b.registered_at.cmp(&a.registered_at))
        }
        RestaurantSortKey::AverageScoreDesc => restaurants.sort_by(compare_average_desc),
        RestaurantSortKey::VisitCountDesc => {
            restaurants.sort_by(|a, b| b.visit_count.cmp(&a.visit_count))
        }
    }
}

fn score_totals(restaurant: &Restaurant) -> Option<(u64, u64)> {
    if restaurant.dishes.is_empty() {
        return None;
    }
    let sum = restaurant
        .dishes
        .iter()
        .map(|dish| u64::from(dish.score))
        .sum();
    Some((sum, restaurant.dishes.len() as u64))
}

// Compares sa/na against sb/nb by cross-multiplying to stay exact.
fn compare_average_desc(a: &Restaurant, b: &Restaurant) -> Ordering {
    match (score_totals(a), score_totals(b)) {
        (Some((sum_a, count_a)), Some((sum_b, count_b))) => {
            (sum_b * count_a).cmp(&(sum_a * count_b))
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
