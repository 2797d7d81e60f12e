//! Singleton user preferences.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default ordering of the restaurant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Name,
    /// Newest registration first.
    Date,
    /// Highest average dish score first.
    Rating,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Date => "date",
            Self::Rating => "rating",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "date" => Some(Self::Date),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }
}

/// Color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "system" => Some(Self::System),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// At most one row of this record exists per store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub id: Uuid,
    pub default_sort_order: SortOrder,
    pub default_filter_genre: Option<String>,
    pub theme: Theme,
}

impl UserPreferences {
    /// First-launch defaults: name order, no genre filter, system theme.
    pub fn new() -> Self {
        Self::with(Theme::default(), SortOrder::default())
    }

    pub fn with(theme: Theme, default_sort_order: SortOrder) -> Self {
        Self {
            id: Uuid::new_v4(),
            default_sort_order,
            default_filter_genre: None,
            theme,
        }
    }
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{SortOrder, Theme, UserPreferences};

    #[test]
    fn defaults_match_first_launch_values() {
        let prefs = UserPreferences::new();
        assert_eq!(prefs.default_sort_order, SortOrder::Name);
        assert_eq!(prefs.theme, Theme::System);
        assert!(prefs.default_filter_genre.is_none());
    }

    #[test]
    fn enum_text_encoding_is_reversible() {
        for order in [SortOrder::Name, SortOrder::Date, SortOrder::Rating] {
            assert_eq!(SortOrder::parse(order.as_str()), Some(order));
        }
        for theme in [Theme::System, Theme::Light, Theme::Dark] {
            assert_eq!(Theme::parse(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::parse("sepia"), None);
    }
}
