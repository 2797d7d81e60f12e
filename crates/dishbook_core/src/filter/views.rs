//! Home-screen sections and list-tab search.

use crate::model::dish::Dish;
use crate::model::restaurant::Restaurant;

/// Most recently registered restaurants, newest first, at most `n`.
pub fn recent(restaurants: &[Restaurant], n: usize) -> Vec<Restaurant> {
    let mut sorted = restaurants.to_vec();
    sorted.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
    sorted.truncate(n);
    sorted
}

/// Favorite restaurants in input order.
pub fn favorites(restaurants: &[Restaurant]) -> Vec<Restaurant> {
    restaurants
        .iter()
        .filter(|restaurant| restaurant.is_favorite)
        .cloned()
        .collect()
}

/// Most visited restaurants, at most `n`.
pub fn frequent(restaurants: &[Restaurant], n: usize) -> Vec<Restaurant> {
    let mut sorted = restaurants.to_vec();
    sorted.sort_by(|a, b| b.visit_count.cmp(&a.visit_count));
    sorted.truncate(n);
    sorted
}

/// Filters restaurants by free text (name or address) and exact genre.
///
/// `text` is trimmed before matching, so `"Sushi "` finds "Sushi" and a
/// whitespace-only query matches everything. Blank `text` disables the text
/// filter and `None` disables the genre filter; with both disabled the input
/// is returned unchanged.
pub fn search_restaurants(
    restaurants: &[Restaurant],
    text: &str,
    genre: Option<&str>,
) -> Vec<Restaurant> {
    let needle = normalize_needle(text);
    restaurants
        .iter()
        .filter(|restaurant| {
            let text_ok = needle.as_deref().map_or(true, |needle| {
                contains_folded(&restaurant.name, needle)
                    || contains_folded(&restaurant.address, needle)
            });
            let genre_ok = genre.map_or(true, |genre| restaurant.genre == genre);
            text_ok && genre_ok
        })
        .cloned()
        .collect()
}

/// Filters dishes by free text (name, trimmed) and exact category.
pub fn search_dishes(dishes: &[Dish], text: &str, category: Option<&str>) -> Vec<Dish> {
    let needle = normalize_needle(text);
    dishes
        .iter()
        .filter(|dish| {
            let text_ok = needle
                .as_deref()
                .map_or(true, |needle| contains_folded(&dish.name, needle));
            let category_ok = category.map_or(true, |category| dish.category == category);
            text_ok && category_ok
        })
        .cloned()
        .collect()
}

fn normalize_needle(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

#[cfg(test)]
mod tests {
    use super::{favorites, frequent, recent, search_dishes, search_restaurants};
    use crate::model::dish::{Dish, DishDraft};
    use crate::model::restaurant::{Restaurant, RestaurantDraft};
    use uuid::Uuid;

    fn restaurant(name: &str, genre: &str, address: &str, registered_at: i64) -> Restaurant {
        Restaurant::from_draft(RestaurantDraft::new(name, genre, address), registered_at).unwrap()
    }

    #[test]
    fn recent_takes_newest_n() {
        let list: Vec<_> = (0..7)
            .map(|idx| restaurant(&format!("r{idx}"), "", "", idx * 10))
            .collect();
        let top = recent(&list, 5);
        let stamps: Vec<_> = top.iter().map(|r| r.registered_at).collect();
        assert_eq!(stamps, vec![60, 50, 40, 30, 20]);
    }

    #[test]
    fn recent_with_fewer_items_than_n_returns_all() {
        let list = vec![restaurant("a", "", "", 1)];
        assert_eq!(recent(&list, 5).len(), 1);
        assert!(recent(&list, 0).is_empty());
    }

    #[test]
    fn favorites_preserves_order_and_is_idempotent() {
        let mut a = restaurant("a", "", "", 1);
        let b = restaurant("b", "", "", 2);
        let mut c = restaurant("c", "", "", 3);
        a.is_favorite = true;
        c.is_favorite = true;
        let list = vec![a, b, c];

        let once = favorites(&list);
        assert_eq!(once.len(), 2);
        assert!(once.iter().all(|r| r.is_favorite));
        assert_eq!(once[0].name, "a");
        assert_eq!(favorites(&once), once);
    }

    #[test]
    fn frequent_orders_by_visit_count_with_stable_ties() {
        let mut a = restaurant("a", "", "", 1);
        let mut b = restaurant("b", "", "", 2);
        let mut c = restaurant("c", "", "", 3);
        a.visit_count = 2;
        b.visit_count = 5;
        c.visit_count = 2;
        let top = frequent(&[a, b, c], 2);
        let names: Vec<_> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn search_restaurants_matches_name_or_address_case_insensitively() {
        let list = vec![
            restaurant("Sushi Taro", "和食", "Tokyo", 1),
            restaurant("Trattoria", "イタリアン", "Shibuya, TOKYO", 2),
            restaurant("Cafe Mori", "カフェ", "Kyoto", 3),
        ];
        assert_eq!(search_restaurants(&list, "tokyo", None).len(), 2);
        assert_eq!(search_restaurants(&list, "SUSHI", None).len(), 1);
        let combined = search_restaurants(&list, "tokyo", Some("イタリアン"));
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].name, "Trattoria");
    }

    #[test]
    fn empty_filters_return_input_unchanged() {
        let list = vec![
            restaurant("b", "和食", "", 1),
            restaurant("a", "洋食", "", 2),
        ];
        assert_eq!(search_restaurants(&list, "", None), list);
        assert_eq!(search_restaurants(&list, "   ", None), list);
        assert!(search_restaurants(&[], "x", Some("和食")).is_empty());
    }

    #[test]
    fn search_dishes_combines_text_and_category() {
        let owner = Uuid::new_v4();
        let dishes: Vec<Dish> = [("Toro Nigiri", "メイン"), ("Miso Soup", "サイド"), ("Tororo", "サイド")]
            .into_iter()
            .map(|(name, category)| Dish::from_draft(DishDraft::new(name, category), owner, 1).unwrap())
            .collect();

        assert_eq!(search_dishes(&dishes, "toro", None).len(), 2);
        assert_eq!(search_dishes(&dishes, "toro", Some("サイド")).len(), 1);
        assert_eq!(search_dishes(&dishes, "", Some("サイド")).len(), 2);
        assert_eq!(search_dishes(&dishes, "", None), dishes);
    }
}
