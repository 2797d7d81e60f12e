//! Restaurant and dish use-case service.
//!
//! # Responsibility
//! - Apply category-name policy, timestamps and owner checks on top of any
//!   repository implementation.
//! - Stay storage-agnostic; transactions belong to the caller.
//!
//! # Invariants
//! - A non-empty genre/category must name an existing category of the
//!   matching kind when the policy is enforced. Updates check it only when the
//!   value changed.
//! - A missing dish owner is reported before any category mismatch.

use crate::model::category::CategoryKind;
use crate::model::dish::{Dish, DishId};
use crate::model::restaurant::{Restaurant, RestaurantId};
use crate::model::validation::ValidationError;
use crate::model::EpochMillis;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::restaurant_repo::RestaurantRepository;
use crate::repo::{RecordKind, RepoError, RepoResult};

pub struct RestaurantService<R: RestaurantRepository, C: CategoryRepository> {
    restaurants: R,
    categories: C,
    enforce_category_names: bool,
}

impl<R: RestaurantRepository, C: CategoryRepository> RestaurantService<R, C> {
    pub fn new(restaurants: R, categories: C, enforce_category_names: bool) -> Self {
        Self {
            restaurants,
            categories,
            enforce_category_names,
        }
    }

    pub fn create_restaurant(&self, restaurant: &Restaurant) -> RepoResult<()> {
        self.ensure_category_known(CategoryKind::Restaurant, &restaurant.genre)?;
        self.restaurants.insert_restaurant(restaurant)
    }

    /// Loads, changes and stores a restaurant, touching `updated_at`.
    pub fn update_restaurant(
        &self,
        id: RestaurantId,
        now: EpochMillis,
        change: impl FnOnce(&mut Restaurant),
    ) -> RepoResult<Restaurant> {
        let mut restaurant = self
            .restaurants
            .get_restaurant(id)?
            .ok_or_else(|| RepoError::not_found(RecordKind::Restaurant, id))?;

        let genre_before = restaurant.genre.clone();
        change(&mut restaurant);
        if restaurant.genre != genre_before {
            self.ensure_category_known(CategoryKind::Restaurant, &restaurant.genre)?;
        }
        restaurant.touch(now);
        self.restaurants.update_restaurant(&restaurant)?;
        Ok(restaurant)
    }

    /// Returns the ids of the dishes removed with the restaurant.
    pub fn delete_restaurant(&self, id: RestaurantId) -> RepoResult<Vec<DishId>> {
        self.restaurants.delete_restaurant(id)
    }

    pub fn create_dish(&self, dish: &Dish) -> RepoResult<()> {
        self.restaurants.insert_dish(dish)?;
        self.ensure_category_known(CategoryKind::Dish, &dish.category)
    }

    pub fn update_dish(
        &self,
        id: DishId,
        now: EpochMillis,
        change: impl FnOnce(&mut Dish),
    ) -> RepoResult<Dish> {
        let mut dish = self
            .restaurants
            .get_dish(id)?
            .ok_or_else(|| RepoError::not_found(RecordKind::Dish, id))?;

        let category_before = dish.category.clone();
        change(&mut dish);
        if dish.category != category_before {
            self.ensure_category_known(CategoryKind::Dish, &dish.category)?;
        }
        dish.touch(now);
        self.restaurants.update_dish(&dish)?;
        Ok(dish)
    }

    /// Returns the owner the dish was removed from.
    pub fn delete_dish(&self, id: DishId, now: EpochMillis) -> RepoResult<RestaurantId> {
        self.restaurants.delete_dish(id, now)
    }

    fn ensure_category_known(&self, kind: CategoryKind, name: &str) -> RepoResult<()> {
        if !self.enforce_category_names || name.is_empty() {
            return Ok(());
        }
        if self.categories.category_name_exists(kind, name)? {
            return Ok(());
        }
        Err(RepoError::Validation(ValidationError::UnknownCategory {
            kind,
            name: name.to_string(),
        }))
    }
}
