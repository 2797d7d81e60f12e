//! Restaurant/dish repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist restaurants together with their owned dish sequence.
//! - Keep dish ordering and the owner back-reference inside storage.
//!
//! # Invariants
//! - Dishes are listed by `position` within their restaurant (insertion order).
//! - Adding or removing a dish touches the owner's `updated_at`.
//! - Deleting a restaurant deletes its dishes in the same statement group.
//! - `updated_at` is written with `MAX(old, new)` and never decreases.

use crate::model::dish::{Dish, DishId};
use crate::model::restaurant::{Restaurant, RestaurantId};
use crate::model::EpochMillis;
use crate::repo::{
    bool_to_int, ensure_connection_ready, parse_bool, parse_count, parse_uuid, RecordKind,
    RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;

const RESTAURANT_SELECT_SQL: &str = "SELECT
    id,
    name,
    genre,
    address,
    url,
    image_path,
    registered_at,
    updated_at,
    is_favorite,
    memo,
    visit_count,
    business_hours
FROM restaurants";

const DISH_SELECT_SQL: &str = "SELECT
    id,
    restaurant_id,
    name,
    category,
    score,
    memo,
    price,
    is_favorite,
    registered_at,
    updated_at,
    order_count,
    image_path
FROM dishes";

/// Repository interface for restaurants and their owned dishes.
pub trait RestaurantRepository {
    /// Inserts a freshly created restaurant (its `dishes` must be empty).
    fn insert_restaurant(&self, restaurant: &Restaurant) -> RepoResult<()>;
    /// Overwrites every editable field and `updated_at`.
    fn update_restaurant(&self, restaurant: &Restaurant) -> RepoResult<()>;
    /// Deletes a restaurant and its dishes, returning the removed dish ids.
    fn delete_restaurant(&self, id: RestaurantId) -> RepoResult<Vec<DishId>>;
    fn get_restaurant(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>>;
    /// Lists restaurants with dishes in insertion order, optionally by genre.
    fn list_restaurants(&self, genre: Option<&str>) -> RepoResult<Vec<Restaurant>>;
    /// Appends a dish to its owner's sequence and touches the owner.
    fn insert_dish(&self, dish: &Dish) -> RepoResult<()>;
    /// Overwrites every editable dish field and `updated_at`.
    fn update_dish(&self, dish: &Dish) -> RepoResult<()>;
    /// Removes a dish from its owner's sequence and touches the owner.
    fn delete_dish(&self, id: DishId, now: EpochMillis) -> RepoResult<RestaurantId>;
    fn get_dish(&self, id: DishId) -> RepoResult<Option<Dish>>;
    /// Lists one restaurant's dishes; `NotFound` when the restaurant is absent.
    fn list_dishes_of(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Dish>>;
}

/// SQLite-backed restaurant repository.
pub struct SqliteRestaurantRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRestaurantRepository<'conn> {
    /// Wraps a connection already checked by `ensure_connection_ready`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Constructs a repository after verifying the connection was migrated.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self::new(conn))
    }
}

impl RestaurantRepository for SqliteRestaurantRepository<'_> {
    fn insert_restaurant(&self, restaurant: &Restaurant) -> RepoResult<()> {
        restaurant.validate()?;
        if !restaurant.dishes.is_empty() {
            return Err(RepoError::InvalidData(
                "new restaurants must not carry dishes; add them with insert_dish".to_string(),
            ));
        }

        self.conn.execute(
            "INSERT INTO restaurants (
                id,
                name,
                genre,
                address,
                url,
                image_path,
                registered_at,
                updated_at,
                is_favorite,
                memo,
                visit_count,
                business_hours
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
            params![
                restaurant.id.to_string(),
                restaurant.name.as_str(),
                restaurant.genre.as_str(),
                restaurant.address.as_str(),
                restaurant.url.as_deref(),
                restaurant.image_path.as_deref(),
                restaurant.registered_at,
                restaurant.updated_at,
                bool_to_int(restaurant.is_favorite),
                restaurant.memo.as_deref(),
                i64::from(restaurant.visit_count),
                restaurant.business_hours.as_deref(),
            ],
        )?;

        Ok(())
    }

    fn update_restaurant(&self, restaurant: &Restaurant) -> RepoResult<()> {
        restaurant.validate()?;

        let changed = self.conn.execute(
            "UPDATE restaurants
             SET
                name = ?2,
                genre = ?3,
                address = ?4,
                url = ?5,
                image_path = ?6,
                is_favorite = ?7,
                memo = ?8,
                visit_count = ?9,
                business_hours = ?10,
                updated_at = MAX(updated_at, ?11)
             WHERE id = ?1;",
            params![
                restaurant.id.to_string(),
                restaurant.name.as_str(),
                restaurant.genre.as_str(),
                restaurant.address.as_str(),
                restaurant.url.as_deref(),
                restaurant.image_path.as_deref(),
                bool_to_int(restaurant.is_favorite),
                restaurant.memo.as_deref(),
                i64::from(restaurant.visit_count),
                restaurant.business_hours.as_deref(),
                restaurant.updated_at,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found(RecordKind::Restaurant, restaurant.id));
        }

        Ok(())
    }

    fn delete_restaurant(&self, id: RestaurantId) -> RepoResult<Vec<DishId>> {
        let id_text = id.to_string();
        let dish_ids = {
            let mut stmt = self.conn.prepare(
                "SELECT id FROM dishes WHERE restaurant_id = ?1 ORDER BY position ASC;",
            )?;
            let mut rows = stmt.query([id_text.as_str()])?;
            let mut ids = Vec::new();
            while let Some(row) = rows.next()? {
                let value: String = row.get(0)?;
                ids.push(parse_uuid(&value, "dishes.id")?);
            }
            ids
        };

        self.conn
            .execute("DELETE FROM dishes WHERE restaurant_id = ?1;", [id_text.as_str()])?;
        let changed = self
            .conn
            .execute("DELETE FROM restaurants WHERE id = ?1;", [id_text.as_str()])?;

        if changed == 0 {
            return Err(RepoError::not_found(RecordKind::Restaurant, id));
        }

        Ok(dish_ids)
    }

    fn get_restaurant(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RESTAURANT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let mut restaurant = parse_restaurant_row(row)?;
        restaurant.dishes = self.list_dishes_of(restaurant.id)?;
        restaurant.validate()?;
        Ok(Some(restaurant))
    }

    fn list_restaurants(&self, genre: Option<&str>) -> RepoResult<Vec<Restaurant>> {
        let mut restaurants = Vec::new();
        {
            let mut stmt = self.conn.prepare(&format!(
                "{RESTAURANT_SELECT_SQL}
                 WHERE (?1 IS NULL OR genre = ?1)
                 ORDER BY rowid ASC;"
            ))?;
            let mut rows = stmt.query([genre])?;
            while let Some(row) = rows.next()? {
                restaurants.push(parse_restaurant_row(row)?);
            }
        }

        let mut dishes_by_owner = self.load_all_dishes_grouped()?;
        for restaurant in &mut restaurants {
            restaurant.dishes = dishes_by_owner.remove(&restaurant.id).unwrap_or_default();
            restaurant.validate()?;
        }

        Ok(restaurants)
    }

    fn insert_dish(&self, dish: &Dish) -> RepoResult<()> {
        dish.validate()?;

        let owner_text = dish.restaurant_id.to_string();
        let touched = self.conn.execute(
            "UPDATE restaurants
             SET updated_at = MAX(updated_at, ?2)
             WHERE id = ?1;",
            params![owner_text.as_str(), dish.updated_at],
        )?;
        if touched == 0 {
            return Err(RepoError::not_found(
                RecordKind::Restaurant,
                dish.restaurant_id,
            ));
        }

        self.conn.execute(
            "INSERT INTO dishes (
                id,
                restaurant_id,
                position,
                name,
                category,
                score,
                memo,
                price,
                is_favorite,
                registered_at,
                updated_at,
                order_count,
                image_path
            ) VALUES (
                ?1,
                ?2,
                (SELECT COALESCE(MAX(position), -1) + 1 FROM dishes WHERE restaurant_id = ?2),
                ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12
            );",
            params![
                dish.id.to_string(),
                owner_text.as_str(),
                dish.name.as_str(),
                dish.category.as_str(),
                i64::from(dish.score),
                dish.memo.as_deref(),
                i64::from(dish.price),
                bool_to_int(dish.is_favorite),
                dish.registered_at,
                dish.updated_at,
                i64::from(dish.order_count),
                dish.image_path.as_deref(),
            ],
        )?;

        Ok(())
    }

    fn update_dish(&self, dish: &Dish) -> RepoResult<()> {
        dish.validate()?;

        let changed = self.conn.execute(
            "UPDATE dishes
             SET
                name = ?2,
                category = ?3,
                score = ?4,
                memo = ?5,
                price = ?6,
                is_favorite = ?7,
                order_count = ?8,
                image_path = ?9,
                updated_at = MAX(updated_at, ?10)
             WHERE id = ?1;",
            params![
                dish.id.to_string(),
                dish.name.as_str(),
                dish.category.as_str(),
                i64::from(dish.score),
                dish.memo.as_deref(),
                i64::from(dish.price),
                bool_to_int(dish.is_favorite),
                i64::from(dish.order_count),
                dish.image_path.as_deref(),
                dish.updated_at,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found(RecordKind::Dish, dish.id));
        }

        Ok(())
    }

    fn delete_dish(&self, id: DishId, now: EpochMillis) -> RepoResult<RestaurantId> {
        let id_text = id.to_string();
        let owner_text: Option<String> = self
            .conn
            .query_row(
                "SELECT restaurant_id FROM dishes WHERE id = ?1;",
                [id_text.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        let Some(owner_text) = owner_text else {
            return Err(RepoError::not_found(RecordKind::Dish, id));
        };

        self.conn
            .execute("DELETE FROM dishes WHERE id = ?1;", [id_text.as_str()])?;
        self.conn.execute(
            "UPDATE restaurants
             SET updated_at = MAX(updated_at, ?2)
             WHERE id = ?1;",
            params![owner_text.as_str(), now],
        )?;

        parse_uuid(&owner_text, "dishes.restaurant_id")
    }

    fn get_dish(&self, id: DishId) -> RepoResult<Option<Dish>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DISH_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_dish_row(row)?));
        }

        Ok(None)
    }

    fn list_dishes_of(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Dish>> {
        let owner_text = restaurant_id.to_string();
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM restaurants WHERE id = ?1);",
            [owner_text.as_str()],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(RepoError::not_found(RecordKind::Restaurant, restaurant_id));
        }

        let mut stmt = self.conn.prepare(&format!(
            "{DISH_SELECT_SQL}
             WHERE restaurant_id = ?1
             ORDER BY position ASC;"
        ))?;
        let mut rows = stmt.query([owner_text.as_str()])?;
        let mut dishes = Vec::new();
        while let Some(row) = rows.next()? {
            dishes.push(parse_dish_row(row)?);
        }

        Ok(dishes)
    }
}

impl SqliteRestaurantRepository<'_> {
    fn load_all_dishes_grouped(&self) -> RepoResult<HashMap<RestaurantId, Vec<Dish>>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DISH_SELECT_SQL} ORDER BY restaurant_id ASC, position ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut grouped: HashMap<RestaurantId, Vec<Dish>> = HashMap::new();
        while let Some(row) = rows.next()? {
            let dish = parse_dish_row(row)?;
            grouped.entry(dish.restaurant_id).or_default().push(dish);
        }
        Ok(grouped)
    }
}

fn parse_restaurant_row(row: &Row<'_>) -> RepoResult<Restaurant> {
    let id_text: String = row.get("id")?;
    Ok(Restaurant {
        id: parse_uuid(&id_text, "restaurants.id")?,
        name: row.get("name")?,
        genre: row.get("genre")?,
        address: row.get("address")?,
        url: row.get("url")?,
        image_path: row.get("image_path")?,
        registered_at: row.get("registered_at")?,
        updated_at: row.get("updated_at")?,
        is_favorite: parse_bool(row.get("is_favorite")?, "restaurants.is_favorite")?,
        memo: row.get("memo")?,
        visit_count: parse_count(row.get("visit_count")?, "restaurants.visit_count")?,
        business_hours: row.get("business_hours")?,
        dishes: Vec::new(),
    })
}

fn parse_dish_row(row: &Row<'_>) -> RepoResult<Dish> {
    let id_text: String = row.get("id")?;
    let owner_text: String = row.get("restaurant_id")?;
    let dish = Dish {
        id: parse_uuid(&id_text, "dishes.id")?,
        restaurant_id: parse_uuid(&owner_text, "dishes.restaurant_id")?,
        name: row.get("name")?,
        category: row.get("category")?,
        score: parse_count(row.get("score")?, "dishes.score")?,
        memo: row.get("memo")?,
        price: parse_count(row.get("price")?, "dishes.price")?,
        is_favorite: parse_bool(row.get("is_favorite")?, "dishes.is_favorite")?,
        registered_at: row.get("registered_at")?,
        updated_at: row.get("updated_at")?,
        order_count: parse_count(row.get("order_count")?, "dishes.order_count")?,
        image_path: row.get("image_path")?,
    };
    dish.validate()?;
    Ok(dish)
}
