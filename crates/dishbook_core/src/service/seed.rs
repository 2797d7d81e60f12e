//! First-launch default data.
//!
//! # Invariants
//! - Each default set is inserted only when no row of that kind exists, so
//!   repeated calls after the first successful run change nothing.
//! - Callers run this inside one transaction.

use crate::model::category::{Category, CategoryKind};
use crate::model::preferences::UserPreferences;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::preferences_repo::PreferencesRepository;
use crate::repo::RepoResult;

pub const DEFAULT_RESTAURANT_GENRES: [&str; 9] = [
    "和食",
    "洋食",
    "中華",
    "イタリアン",
    "フレンチ",
    "アジア料理",
    "カフェ",
    "ファストフード",
    "その他",
];

pub const DEFAULT_DISH_CATEGORIES: [&str; 6] =
    ["前菜", "メイン", "サイド", "デザート", "ドリンク", "その他"];

/// What a seeding pass inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub preferences_created: bool,
    pub restaurant_categories_inserted: usize,
    pub dish_categories_inserted: usize,
}

impl SeedReport {
    pub fn is_noop(&self) -> bool {
        !self.preferences_created
            && self.restaurant_categories_inserted == 0
            && self.dish_categories_inserted == 0
    }
}

/// Inserts default preferences and category sets that are still missing.
pub fn seed_defaults_if_empty(
    preferences: &impl PreferencesRepository,
    categories: &impl CategoryRepository,
) -> RepoResult<SeedReport> {
    let mut report = SeedReport::default();

    if preferences.get_preferences()?.is_none() {
        preferences.upsert_preferences(&UserPreferences::new())?;
        report.preferences_created = true;
    }

    report.restaurant_categories_inserted =
        seed_kind(categories, CategoryKind::Restaurant, &DEFAULT_RESTAURANT_GENRES)?;
    report.dish_categories_inserted =
        seed_kind(categories, CategoryKind::Dish, &DEFAULT_DISH_CATEGORIES)?;

    Ok(report)
}

fn seed_kind(
    repo: &impl CategoryRepository,
    kind: CategoryKind,
    names: &[&str],
) -> RepoResult<usize> {
    if repo.count_categories(kind)? > 0 {
        return Ok(0);
    }
    for name in names {
        repo.insert_category(&Category::new(*name, kind)?)?;
    }
    Ok(names.len())
}

#[cfg(test)]
mod tests {
    use super::{seed_defaults_if_empty, DEFAULT_DISH_CATEGORIES, DEFAULT_RESTAURANT_GENRES};
    use crate::model::category::{Category, CategoryKind};
    use crate::model::preferences::UserPreferences;
    use crate::repo::category_repo::CategoryRepository;
    use crate::repo::preferences_repo::PreferencesRepository;
    use crate::repo::RepoResult;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryPreferences(RefCell<Option<UserPreferences>>);

    impl PreferencesRepository for MemoryPreferences {
        fn get_preferences(&self) -> RepoResult<Option<UserPreferences>> {
            Ok(self.0.borrow().clone())
        }

        fn upsert_preferences(&self, preferences: &UserPreferences) -> RepoResult<()> {
            let mut slot = self.0.borrow_mut();
            let id = slot.as_ref().map_or(preferences.id, |stored| stored.id);
            *slot = Some(UserPreferences {
                id,
                ..preferences.clone()
            });
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryCategories(RefCell<Vec<Category>>);

    impl CategoryRepository for MemoryCategories {
        fn insert_category(&self, category: &Category) -> RepoResult<()> {
            self.0.borrow_mut().push(category.clone());
            Ok(())
        }

        fn list_categories(&self, kind: Option<CategoryKind>) -> RepoResult<Vec<Category>> {
            Ok(self
                .0
                .borrow()
                .iter()
                .filter(|category| kind.map_or(true, |kind| category.kind == kind))
                .cloned()
                .collect())
        }

        fn count_categories(&self, kind: CategoryKind) -> RepoResult<u64> {
            Ok(self.list_categories(Some(kind))?.len() as u64)
        }

        fn category_name_exists(&self, kind: CategoryKind, name: &str) -> RepoResult<bool> {
            Ok(self
                .0
                .borrow()
                .iter()
                .any(|category| category.kind == kind && category.name == name))
        }
    }

    #[test]
    fn seeding_fills_empty_repositories_once() {
        let preferences = MemoryPreferences::default();
        let categories = MemoryCategories::default();

        let first = seed_defaults_if_empty(&preferences, &categories).unwrap();
        assert!(first.preferences_created);
        assert_eq!(
            first.restaurant_categories_inserted,
            DEFAULT_RESTAURANT_GENRES.len()
        );
        assert_eq!(first.dish_categories_inserted, DEFAULT_DISH_CATEGORIES.len());

        let stored_id = preferences.get_preferences().unwrap().unwrap().id;
        assert!(seed_defaults_if_empty(&preferences, &categories)
            .unwrap()
            .is_noop());
        assert_eq!(preferences.get_preferences().unwrap().unwrap().id, stored_id);
        assert_eq!(categories.0.borrow().len(), 15);
    }

    #[test]
    fn existing_preferences_are_left_alone() {
        let preferences = MemoryPreferences::default();
        let custom = UserPreferences {
            default_filter_genre: Some("和食".to_string()),
            ..UserPreferences::new()
        };
        preferences.upsert_preferences(&custom).unwrap();

        let report = seed_defaults_if_empty(&preferences, &MemoryCategories::default()).unwrap();
        assert!(!report.preferences_created);
        assert_eq!(preferences.get_preferences().unwrap(), Some(custom));
    }
}
