//! Pure derived views over catalogue snapshots.
//!
//! # Responsibility
//! - Compute the home-screen sections (recent, favorite, frequent).
//! - Apply text/genre/category search used by the list tabs.
//! - Classify scores into display bands.
//!
//! # Invariants
//! - No function here touches storage; inputs are snapshots.
//! - Every sort is stable, so ties keep input order.

pub mod rating;
pub mod sort;
pub mod views;

pub use rating::RatingBand;
pub use sort::{average_score, sort_restaurants, RestaurantSortKey};
pub use views::{favorites, frequent, recent, search_dishes, search_restaurants};
