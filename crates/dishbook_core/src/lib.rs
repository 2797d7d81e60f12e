//! Core domain logic for DishBook, a personal restaurant and dish catalogue.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CatalogConfig;
pub use db::CURRENT_SCHEMA_VERSION;
pub use filter::{
    average_score, favorites, frequent, recent, search_dishes, search_restaurants,
    sort_restaurants, RatingBand, RestaurantSortKey,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId, CategoryKind};
pub use model::dish::{Dish, DishDraft, DishId, DishPatch};
pub use model::preferences::{SortOrder, Theme, UserPreferences};
pub use model::restaurant::{Restaurant, RestaurantDraft, RestaurantId, RestaurantPatch};
pub use model::validation::ValidationError;
pub use model::EpochMillis;
pub use repo::{RecordKind, RepoError, RepoResult};
pub use service::catalog_service::Catalog;
pub use service::clock::{Clock, ManualClock, SystemClock};
pub use service::events::{ChangeEvent, ChangeListener, SubscriptionId};
pub use service::restaurant_service::RestaurantService;
pub use service::seed::{SeedReport, DEFAULT_DISH_CATEGORIES, DEFAULT_RESTAURANT_GENRES};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
