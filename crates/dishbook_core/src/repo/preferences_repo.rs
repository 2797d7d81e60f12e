//! Singleton preferences repository.
//!
//! # Invariants
//! - The table holds at most one row, keyed by `singleton = 1`.
//! - Upserts keep the id of the existing row.

use crate::model::preferences::{SortOrder, Theme, UserPreferences};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

pub trait PreferencesRepository {
    fn get_preferences(&self) -> RepoResult<Option<UserPreferences>>;
    /// Creates the singleton row or updates the existing one.
    fn upsert_preferences(&self, preferences: &UserPreferences) -> RepoResult<()>;
}

/// SQLite-backed preferences repository.
pub struct SqlitePreferencesRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferencesRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self::new(conn))
    }
}

impl PreferencesRepository for SqlitePreferencesRepository<'_> {
    fn get_preferences(&self) -> RepoResult<Option<UserPreferences>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, default_sort_order, default_filter_genre, theme
             FROM user_preferences
             WHERE singleton = 1;",
        )?;
        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_preferences_row(row)?));
        }
        Ok(None)
    }

    fn upsert_preferences(&self, preferences: &UserPreferences) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO user_preferences (
                singleton,
                id,
                default_sort_order,
                default_filter_genre,
                theme
            ) VALUES (1, ?1, ?2, ?3, ?4)
            ON CONFLICT(singleton) DO UPDATE SET
                default_sort_order = excluded.default_sort_order,
                default_filter_genre = excluded.default_filter_genre,
                theme = excluded.theme;",
            params![
                preferences.id.to_string(),
                preferences.default_sort_order.as_str(),
                preferences.default_filter_genre.as_deref(),
                preferences.theme.as_str(),
            ],
        )?;
        Ok(())
    }
}

fn parse_preferences_row(row: &Row<'_>) -> RepoResult<UserPreferences> {
    let id_text: String = row.get("id")?;
    let sort_text: String = row.get("default_sort_order")?;
    let theme_text: String = row.get("theme")?;

    let default_sort_order = SortOrder::parse(&sort_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid sort order `{sort_text}` in user_preferences.default_sort_order"
        ))
    })?;
    let theme = Theme::parse(&theme_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid theme `{theme_text}` in user_preferences.theme"))
    })?;

    Ok(UserPreferences {
        id: parse_uuid(&id_text, "user_preferences.id")?,
        default_sort_order,
        default_filter_genre: row.get("default_filter_genre")?,
        theme,
    })
}
