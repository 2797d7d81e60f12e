//! Catalogue use-case service.
//!
//! # Responsibility
//! - Own the store connection for the application lifetime and expose every
//!   read/write use-case the presentation layer needs.
//! - Run each use case in its own transaction through `RestaurantService`.
//! - Notify subscribers after each committed mutation.
//!
//! # Invariants
//! - Every mutation commits as one immediate transaction.
//! - Returned records are owned snapshots; nothing hands out store handles.
//! - Listeners never observe a change that was rolled back.

use crate::config::CatalogConfig;
use crate::db::{open_db, open_db_in_memory};
use crate::filter::sort::{sort_restaurants, RestaurantSortKey};
use crate::model::category::{Category, CategoryKind};
use crate::model::dish::{Dish, DishDraft, DishId, DishPatch};
use crate::model::preferences::{SortOrder, Theme, UserPreferences};
use crate::model::restaurant::{Restaurant, RestaurantDraft, RestaurantId, RestaurantPatch};
use crate::repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
use crate::repo::preferences_repo::{PreferencesRepository, SqlitePreferencesRepository};
use crate::repo::restaurant_repo::{RestaurantRepository, SqliteRestaurantRepository};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use crate::service::clock::{Clock, SystemClock};
use crate::service::events::{ChangeEvent, ChangeListener, ChangeNotifier, SubscriptionId};
use crate::service::restaurant_service::RestaurantService;
use crate::service::seed::{self, SeedReport};
use log::{debug, info, warn};
use rusqlite::{Connection, TransactionBehavior};
use std::sync::Arc;

/// Explicit store object passed by reference to whatever needs catalogue data.
pub struct Catalog {
    conn: Connection,
    clock: Box<dyn Clock>,
    enforce_category_names: bool,
    notifier: ChangeNotifier,
}

impl Catalog {
    /// Opens (and migrates) the configured store, seeding defaults if asked.
    pub fn open(config: &CatalogConfig) -> RepoResult<Self> {
        let conn = match config.db_path.as_ref() {
            Some(path) => open_db(path)?,
            None => open_db_in_memory()?,
        };
        let mut catalog = Self::from_connection(conn, config)?;
        if config.seed_on_open {
            catalog.seed_defaults_if_empty()?;
        }
        Ok(catalog)
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection, config: &CatalogConfig) -> RepoResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self {
            conn,
            clock: Box::new(SystemClock),
            enforce_category_names: config.enforce_category_names,
            notifier: ChangeNotifier::new(),
        })
    }

    /// Replaces the time source used for record timestamps.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Underlying connection, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn subscribe(&mut self, listener: Arc<dyn ChangeListener>) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // Restaurants

    pub fn create_restaurant(&mut self, draft: RestaurantDraft) -> RepoResult<Restaurant> {
        let restaurant = Restaurant::from_draft(draft, self.clock.now_ms())?;
        let enforce = self.enforce_category_names;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        restaurant_service(&tx, enforce).create_restaurant(&restaurant)?;
        tx.commit()?;

        self.publish(ChangeEvent::RestaurantCreated {
            restaurant_id: restaurant.id,
        });
        Ok(restaurant)
    }

    /// Applies `patch` and touches `updated_at`, even when the patch is empty.
    pub fn update_restaurant(
        &mut self,
        id: RestaurantId,
        patch: &RestaurantPatch,
    ) -> RepoResult<Restaurant> {
        self.mutate_restaurant(id, |restaurant| patch.apply_to(restaurant))
    }

    /// Flips the favorite flag and returns the new value.
    pub fn toggle_restaurant_favorite(&mut self, id: RestaurantId) -> RepoResult<bool> {
        let restaurant =
            self.mutate_restaurant(id, |restaurant| restaurant.is_favorite = !restaurant.is_favorite)?;
        Ok(restaurant.is_favorite)
    }

    /// Deletes a restaurant together with every dish it owns.
    pub fn delete_restaurant(&mut self, id: RestaurantId) -> RepoResult<()> {
        let enforce = self.enforce_category_names;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let dish_ids = match restaurant_service(&tx, enforce).delete_restaurant(id) {
            Ok(dish_ids) => dish_ids,
            Err(err) => {
                log_rejected("restaurant_delete", &err);
                return Err(err);
            }
        };
        tx.commit()?;

        debug!(
            "event=restaurant_delete module=catalog status=ok cascaded_dishes={}",
            dish_ids.len()
        );
        self.publish(ChangeEvent::RestaurantDeleted {
            restaurant_id: id,
            dish_ids,
        });
        Ok(())
    }

    pub fn get_restaurant(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>> {
        SqliteRestaurantRepository::new(&self.conn).get_restaurant(id)
    }

    /// Full snapshot, stable-sorted by `sort_key`.
    pub fn list_restaurants(&self, sort_key: RestaurantSortKey) -> RepoResult<Vec<Restaurant>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut restaurants = SqliteRestaurantRepository::new(&tx).list_restaurants(None)?;
        tx.commit()?;
        sort_restaurants(&mut restaurants, sort_key);
        Ok(restaurants)
    }

    /// Restaurants whose genre equals `genre`, sorted by name.
    pub fn list_restaurants_by_genre(&self, genre: &str) -> RepoResult<Vec<Restaurant>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut restaurants = SqliteRestaurantRepository::new(&tx).list_restaurants(Some(genre))?;
        tx.commit()?;
        sort_restaurants(&mut restaurants, RestaurantSortKey::Name);
        Ok(restaurants)
    }

    /// Sort key derived from stored preferences, `Name` when none exist.
    pub fn default_sort_key(&self) -> RepoResult<RestaurantSortKey> {
        Ok(self
            .get_preferences()?
            .map(|prefs| RestaurantSortKey::from(prefs.default_sort_order))
            .unwrap_or_default())
    }

    // Dishes

    /// Appends a dish to the owner's sequence and touches the owner.
    pub fn create_dish(&mut self, draft: DishDraft, owner_id: RestaurantId) -> RepoResult<Dish> {
        let dish = Dish::from_draft(draft, owner_id, self.clock.now_ms())?;
        let enforce = self.enforce_category_names;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if let Err(err) = restaurant_service(&tx, enforce).create_dish(&dish) {
            log_rejected("dish_create", &err);
            return Err(err);
        }
        tx.commit()?;

        self.publish(ChangeEvent::DishCreated {
            dish_id: dish.id,
            restaurant_id: owner_id,
        });
        Ok(dish)
    }

    pub fn update_dish(&mut self, id: DishId, patch: &DishPatch) -> RepoResult<Dish> {
        self.mutate_dish(id, |dish| patch.apply_to(dish))
    }

    pub fn toggle_dish_favorite(&mut self, id: DishId) -> RepoResult<bool> {
        let dish = self.mutate_dish(id, |dish| dish.is_favorite = !dish.is_favorite)?;
        Ok(dish.is_favorite)
    }

    /// Removes a dish from its owner's sequence.
    pub fn delete_dish(&mut self, id: DishId) -> RepoResult<()> {
        let now = self.clock.now_ms();
        let enforce = self.enforce_category_names;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let restaurant_id = match restaurant_service(&tx, enforce).delete_dish(id, now) {
            Ok(owner) => owner,
            Err(err) => {
                log_rejected("dish_delete", &err);
                return Err(err);
            }
        };
        tx.commit()?;

        self.publish(ChangeEvent::DishDeleted {
            dish_id: id,
            restaurant_id,
        });
        Ok(())
    }

    pub fn get_dish(&self, id: DishId) -> RepoResult<Option<Dish>> {
        SqliteRestaurantRepository::new(&self.conn).get_dish(id)
    }

    /// The owner's dish sequence in insertion order.
    pub fn list_dishes_of(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Dish>> {
        SqliteRestaurantRepository::new(&self.conn).list_dishes_of(restaurant_id)
    }

    /// Every dish, grouped by restaurant name order, then owner sequence.
    pub fn list_all_dishes(&self) -> RepoResult<Vec<Dish>> {
        Ok(self
            .list_restaurants(RestaurantSortKey::Name)?
            .into_iter()
            .flat_map(|restaurant| restaurant.dishes)
            .collect())
    }

    // Categories

    /// Inserts a category. Duplicate names are permitted.
    pub fn create_category(
        &mut self,
        name: impl Into<String>,
        kind: CategoryKind,
    ) -> RepoResult<Category> {
        let category = Category::new(name, kind)?;
        SqliteCategoryRepository::new(&self.conn).insert_category(&category)?;

        self.publish(ChangeEvent::CategoryCreated {
            category_id: category.id,
            kind,
        });
        Ok(category)
    }

    /// Categories of `kind` sorted by name.
    pub fn list_categories(&self, kind: CategoryKind) -> RepoResult<Vec<Category>> {
        SqliteCategoryRepository::new(&self.conn).list_categories(Some(kind))
    }

    // Preferences and seeding

    /// Idempotent first-launch seeding; emits an event only when rows were added.
    pub fn seed_defaults_if_empty(&mut self) -> RepoResult<SeedReport> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let report = seed::seed_defaults_if_empty(
            &SqlitePreferencesRepository::new(&tx),
            &SqliteCategoryRepository::new(&tx),
        )?;
        tx.commit()?;

        if report.is_noop() {
            debug!("event=seed_defaults module=catalog status=skipped");
        } else {
            info!(
                "event=seed_defaults module=catalog status=ok preferences_created={} restaurant_categories={} dish_categories={}",
                report.preferences_created,
                report.restaurant_categories_inserted,
                report.dish_categories_inserted
            );
            self.notifier.emit(&ChangeEvent::DefaultsSeeded(report));
        }
        Ok(report)
    }

    pub fn get_preferences(&self) -> RepoResult<Option<UserPreferences>> {
        SqlitePreferencesRepository::new(&self.conn).get_preferences()
    }

    /// Creates the singleton or updates theme and sort order on the existing one.
    pub fn save_preferences(
        &mut self,
        theme: Theme,
        sort_order: SortOrder,
    ) -> RepoResult<UserPreferences> {
        let mut preferences = self
            .get_preferences()?
            .unwrap_or_else(|| UserPreferences::with(theme, sort_order));
        preferences.theme = theme;
        preferences.default_sort_order = sort_order;
        self.save_preferences_full(&preferences)
    }

    /// Persists every preferences field, keeping the stored row id.
    pub fn save_preferences_full(
        &mut self,
        preferences: &UserPreferences,
    ) -> RepoResult<UserPreferences> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let repo = SqlitePreferencesRepository::new(&tx);
        repo.upsert_preferences(preferences)?;
        let stored = repo.get_preferences()?.ok_or_else(|| {
            RepoError::InvalidData("preferences row missing after upsert".to_string())
        })?;
        tx.commit()?;

        self.publish(ChangeEvent::PreferencesSaved);
        Ok(stored)
    }

    fn mutate_restaurant(
        &mut self,
        id: RestaurantId,
        change: impl FnOnce(&mut Restaurant),
    ) -> RepoResult<Restaurant> {
        let now = self.clock.now_ms();
        let enforce = self.enforce_category_names;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let restaurant = restaurant_service(&tx, enforce)
            .update_restaurant(id, now, change)
            .inspect_err(|err| log_rejected("restaurant_update", err))?;
        tx.commit()?;

        self.publish(ChangeEvent::RestaurantUpdated { restaurant_id: id });
        Ok(restaurant)
    }

    fn mutate_dish(&mut self, id: DishId, change: impl FnOnce(&mut Dish)) -> RepoResult<Dish> {
        let now = self.clock.now_ms();
        let enforce = self.enforce_category_names;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let dish = restaurant_service(&tx, enforce)
            .update_dish(id, now, change)
            .inspect_err(|err| log_rejected("dish_update", err))?;
        tx.commit()?;

        self.publish(ChangeEvent::DishUpdated {
            dish_id: id,
            restaurant_id: dish.restaurant_id,
        });
        Ok(dish)
    }

    fn publish(&self, event: ChangeEvent) {
        debug!("event={} module=catalog status=ok", event.name());
        self.notifier.emit(&event);
    }
}

/// Use-case service over the repositories bound to `conn` (usually a transaction).
fn restaurant_service(
    conn: &Connection,
    enforce_category_names: bool,
) -> RestaurantService<SqliteRestaurantRepository<'_>, SqliteCategoryRepository<'_>> {
    RestaurantService::new(
        SqliteRestaurantRepository::new(conn),
        SqliteCategoryRepository::new(conn),
        enforce_category_names,
    )
}

fn log_rejected(event: &str, err: &RepoError) {
    if err.is_storage_fault() {
        warn!("event={event} module=catalog status=error error={err}");
    } else {
        debug!("event={event} module=catalog status=rejected error={err}");
    }
}
