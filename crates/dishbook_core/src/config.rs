//! Catalogue configuration.
//!
//! Hosts build this directly or deserialize it from their own settings
//! file; every field has a default so partial documents are accepted.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// SQLite file location. `None` opens an in-memory store.
    pub db_path: Option<PathBuf>,
    /// When set, a non-empty genre/category must name an existing category
    /// of the matching kind at write time.
    pub enforce_category_names: bool,
    /// Run default seeding as part of `Catalog::open`.
    pub seed_on_open: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            enforce_category_names: true,
            seed_on_open: true,
        }
    }
}

impl CatalogConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(path.into()),
            ..Self::default()
        }
    }
}
