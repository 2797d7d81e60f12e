use dishbook_core::{
    recent, search_restaurants, Catalog, CatalogConfig, CategoryKind, DishDraft, ManualClock,
    RecordKind, RepoError, RestaurantDraft, RestaurantPatch, RestaurantSortKey, ValidationError,
};
use std::sync::Arc;
use uuid::Uuid;

fn seeded_catalog() -> Catalog {
    Catalog::open(&CatalogConfig::in_memory())
        .unwrap()
        .with_clock(ManualClock::new(1_000, 10))
}

#[test]
fn create_sets_equal_timestamps_and_empty_dishes() {
    let mut catalog = seeded_catalog();

    let created = catalog
        .create_restaurant(RestaurantDraft::new("Sushi Taro", "和食", "Tokyo"))
        .unwrap();
    assert_eq!(created.registered_at, created.updated_at);
    assert!(created.dishes.is_empty());
    assert!(!created.is_favorite);
    assert_eq!(created.visit_count, 0);

    let loaded = catalog.get_restaurant(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn update_applies_patch_and_advances_updated_at() {
    let mut catalog = seeded_catalog();
    let created = catalog
        .create_restaurant(RestaurantDraft::new("Bistro", "フレンチ", "Osaka"))
        .unwrap();

    let patch = RestaurantPatch {
        name: Some("Bistro Lune".to_string()),
        url: Some(Some("https://example.com".to_string())),
        visit_count: Some(4),
        ..RestaurantPatch::default()
    };
    let updated = catalog.update_restaurant(created.id, &patch).unwrap();

    assert_eq!(updated.name, "Bistro Lune");
    assert_eq!(updated.url.as_deref(), Some("https://example.com"));
    assert_eq!(updated.visit_count, 4);
    assert_eq!(updated.registered_at, created.registered_at);
    assert!(updated.updated_at > created.updated_at);

    let loaded = catalog.get_restaurant(created.id).unwrap().unwrap();
    assert_eq!(loaded, updated);
}

#[test]
fn updated_at_never_decreases_even_when_clock_goes_back() {
    let clock = Arc::new(ManualClock::new(5_000, 0));
    let mut catalog = Catalog::open(&CatalogConfig::in_memory())
        .unwrap()
        .with_clock(Arc::clone(&clock));
    let created = catalog
        .create_restaurant(RestaurantDraft::new("Cafe Mori", "カフェ", "Kyoto"))
        .unwrap();

    let unchanged = catalog
        .update_restaurant(created.id, &RestaurantPatch::default())
        .unwrap();
    assert_eq!(unchanged.updated_at, created.updated_at);

    clock.set(10);
    let after_skew = catalog
        .update_restaurant(created.id, &RestaurantPatch::default())
        .unwrap();
    assert_eq!(after_skew.updated_at, created.updated_at);
    assert!(after_skew.updated_at >= after_skew.registered_at);
}

#[test]
fn update_and_delete_unknown_id_return_not_found() {
    let mut catalog = seeded_catalog();
    let missing = Uuid::new_v4();

    let update_err = catalog
        .update_restaurant(missing, &RestaurantPatch::default())
        .unwrap_err();
    assert!(matches!(
        update_err,
        RepoError::NotFound { kind: RecordKind::Restaurant, id } if id == missing
    ));
    assert!(!update_err.is_storage_fault());

    let delete_err = catalog.delete_restaurant(missing).unwrap_err();
    assert!(matches!(delete_err, RepoError::NotFound { .. }));
}

#[test]
fn blank_name_is_rejected_on_create_and_update() {
    let mut catalog = seeded_catalog();

    let create_err = catalog
        .create_restaurant(RestaurantDraft::new("   ", "和食", "Tokyo"))
        .unwrap_err();
    assert!(matches!(
        create_err,
        RepoError::Validation(ValidationError::EmptyName { .. })
    ));

    let created = catalog
        .create_restaurant(RestaurantDraft::new("Ramen Ichi", "中華", "Sapporo"))
        .unwrap();
    let patch = RestaurantPatch {
        name: Some(String::new()),
        ..RestaurantPatch::default()
    };
    let update_err = catalog.update_restaurant(created.id, &patch).unwrap_err();
    assert!(matches!(update_err, RepoError::Validation(_)));

    let loaded = catalog.get_restaurant(created.id).unwrap().unwrap();
    assert_eq!(loaded.name, "Ramen Ichi");
}

#[test]
fn unknown_genre_is_rejected_when_enforcement_is_on() {
    let mut catalog = seeded_catalog();

    let err = catalog
        .create_restaurant(RestaurantDraft::new("Taco Stand", "メキシカン", "Osaka"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::UnknownCategory {
            kind: CategoryKind::Restaurant,
            ..
        })
    ));

    catalog
        .create_category("メキシカン", CategoryKind::Restaurant)
        .unwrap();
    catalog
        .create_restaurant(RestaurantDraft::new("Taco Stand", "メキシカン", "Osaka"))
        .unwrap();

    let unset_genre = catalog
        .create_restaurant(RestaurantDraft::new("Mystery Diner", "", "Nagoya"))
        .unwrap();
    assert_eq!(unset_genre.genre, "");
}

#[test]
fn free_text_genre_is_accepted_when_enforcement_is_off() {
    let config = CatalogConfig {
        enforce_category_names: false,
        seed_on_open: false,
        ..CatalogConfig::default()
    };
    let mut catalog = Catalog::open(&config).unwrap();

    let created = catalog
        .create_restaurant(RestaurantDraft::new("Taco Stand", "メキシカン", "Osaka"))
        .unwrap();
    assert_eq!(created.genre, "メキシカン");
}

#[test]
fn list_sorts_by_name_by_default_and_filters_by_genre() {
    let mut catalog = seeded_catalog();
    for (name, genre) in [("Yakitori", "和食"), ("Burger", "洋食"), ("Anago", "和食")] {
        catalog
            .create_restaurant(RestaurantDraft::new(name, genre, "Tokyo"))
            .unwrap();
    }

    let names: Vec<_> = catalog
        .list_restaurants(RestaurantSortKey::Name)
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Anago", "Burger", "Yakitori"]);

    let washoku: Vec<_> = catalog
        .list_restaurants_by_genre("和食")
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(washoku, vec!["Anago", "Yakitori"]);

    let newest_first: Vec<_> = catalog
        .list_restaurants(RestaurantSortKey::RegisteredDesc)
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(newest_first, vec!["Anago", "Burger", "Yakitori"]);
}

#[test]
fn rating_sort_uses_average_dish_score() {
    let mut catalog = seeded_catalog();
    let low = catalog
        .create_restaurant(RestaurantDraft::new("Low", "和食", ""))
        .unwrap();
    let high = catalog
        .create_restaurant(RestaurantDraft::new("High", "和食", ""))
        .unwrap();
    catalog
        .create_restaurant(RestaurantDraft::new("Unrated", "和食", ""))
        .unwrap();
    catalog
        .create_dish(DishDraft::new("a", "メイン").with_score(30), low.id)
        .unwrap();
    catalog
        .create_dish(DishDraft::new("b", "メイン").with_score(95), high.id)
        .unwrap();

    let names: Vec<_> = catalog
        .list_restaurants(RestaurantSortKey::AverageScoreDesc)
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["High", "Low", "Unrated"]);
}

#[test]
fn toggle_favorite_flips_and_persists() {
    let mut catalog = seeded_catalog();
    let created = catalog
        .create_restaurant(RestaurantDraft::new("Cafe Mori", "カフェ", "Kyoto"))
        .unwrap();

    assert!(catalog.toggle_restaurant_favorite(created.id).unwrap());
    assert!(catalog.get_restaurant(created.id).unwrap().unwrap().is_favorite);
    assert!(!catalog.toggle_restaurant_favorite(created.id).unwrap());
}

#[test]
fn recent_over_catalog_snapshot_returns_newest_five() {
    let mut catalog = seeded_catalog();
    for idx in 0..7 {
        catalog
            .create_restaurant(RestaurantDraft::new(format!("r{idx}"), "和食", ""))
            .unwrap();
    }

    let snapshot = catalog.list_restaurants(RestaurantSortKey::Name).unwrap();
    let top = recent(&snapshot, 5);
    assert_eq!(top.len(), 5);
    let names: Vec<_> = top.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["r6", "r5", "r4", "r3", "r2"]);
    assert!(top
        .windows(2)
        .all(|pair| pair[0].registered_at >= pair[1].registered_at));
}

#[test]
fn changing_genre_to_unknown_name_leaves_row_unchanged() {
    let mut catalog = seeded_catalog();
    let created = catalog
        .create_restaurant(RestaurantDraft::new("Sushi Taro", "和食", "Tokyo"))
        .unwrap();

    let patch = RestaurantPatch {
        genre: Some("nope".to_string()),
        address: Some("Osaka".to_string()),
        ..RestaurantPatch::default()
    };
    let err = catalog.update_restaurant(created.id, &patch).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::UnknownCategory {
            kind: CategoryKind::Restaurant,
            ref name,
        }) if name == "nope"
    ));
    assert_eq!(catalog.get_restaurant(created.id).unwrap().unwrap(), created);

    let known = RestaurantPatch {
        genre: Some("洋食".to_string()),
        ..RestaurantPatch::default()
    };
    let updated = catalog.update_restaurant(created.id, &known).unwrap();
    assert_eq!(updated.genre, "洋食");
}

#[test]
fn whitespace_around_search_text_is_ignored() {
    let mut catalog = seeded_catalog();
    for name in ["Sushi Taro", "Burger Barn"] {
        catalog
            .create_restaurant(RestaurantDraft::new(name, "和食", ""))
            .unwrap();
    }
    let snapshot = catalog.list_restaurants(RestaurantSortKey::Name).unwrap();

    assert_eq!(search_restaurants(&snapshot, "   ", None).len(), 2);
    let hits = search_restaurants(&snapshot, "Sushi Taro ", None);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Sushi Taro");
}
