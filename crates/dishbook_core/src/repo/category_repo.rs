//! Category repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Inserts are unconditional; duplicate names are permitted.
//! - Listing is filtered by kind and sorted by name.

use crate::model::category::{Category, CategoryKind};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

/// Repository interface for category tags.
pub trait CategoryRepository {
    fn insert_category(&self, category: &Category) -> RepoResult<()>;
    /// Lists categories of `kind` sorted by name, or all of them when `None`.
    fn list_categories(&self, kind: Option<CategoryKind>) -> RepoResult<Vec<Category>>;
    fn count_categories(&self, kind: CategoryKind) -> RepoResult<u64>;
    fn category_name_exists(&self, kind: CategoryKind, name: &str) -> RepoResult<bool>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self::new(conn))
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn insert_category(&self, category: &Category) -> RepoResult<()> {
        category.validate()?;
        self.conn.execute(
            "INSERT INTO categories (id, name, kind) VALUES (?1, ?2, ?3);",
            params![
                category.id.to_string(),
                category.name.as_str(),
                category.kind.as_str(),
            ],
        )?;
        Ok(())
    }

    fn list_categories(&self, kind: Option<CategoryKind>) -> RepoResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, kind
             FROM categories
             WHERE (?1 IS NULL OR kind = ?1)
             ORDER BY name ASC, rowid ASC;",
        )?;
        let mut rows = stmt.query([kind.map(CategoryKind::as_str)])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn count_categories(&self, kind: CategoryKind) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM categories WHERE kind = ?1;",
            [kind.as_str()],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative category count `{count}`")))
    }

    fn category_name_exists(&self, kind: CategoryKind, name: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE kind = ?1 AND name = ?2);",
            params![kind.as_str(), name],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let id_text: String = row.get("id")?;
    let kind_text: String = row.get("kind")?;
    let kind = CategoryKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid category kind `{kind_text}` in categories.kind"))
    })?;
    let category = Category {
        id: parse_uuid(&id_text, "categories.id")?,
        name: row.get("name")?,
        kind,
    };
    category.validate()?;
    Ok(category)
}
