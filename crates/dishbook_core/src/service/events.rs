//! Explicit change notifications for presentation layers.
//!
//! # Invariants
//! - Events are emitted only after the owning transaction committed.
//! - Listeners run synchronously, in subscription order.

use crate::model::category::{CategoryId, CategoryKind};
use crate::model::dish::DishId;
use crate::model::restaurant::RestaurantId;
use crate::service::seed::SeedReport;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    RestaurantCreated {
        restaurant_id: RestaurantId,
    },
    RestaurantUpdated {
        restaurant_id: RestaurantId,
    },
    /// Carries the ids of the dishes removed with the restaurant.
    RestaurantDeleted {
        restaurant_id: RestaurantId,
        dish_ids: Vec<DishId>,
    },
    DishCreated {
        dish_id: DishId,
        restaurant_id: RestaurantId,
    },
    DishUpdated {
        dish_id: DishId,
        restaurant_id: RestaurantId,
    },
    DishDeleted {
        dish_id: DishId,
        restaurant_id: RestaurantId,
    },
    CategoryCreated {
        category_id: CategoryId,
        kind: CategoryKind,
    },
    PreferencesSaved,
    DefaultsSeeded(SeedReport),
}

impl ChangeEvent {
    /// Stable event name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RestaurantCreated { .. } => "restaurant_created",
            Self::RestaurantUpdated { .. } => "restaurant_updated",
            Self::RestaurantDeleted { .. } => "restaurant_deleted",
            Self::DishCreated { .. } => "dish_created",
            Self::DishUpdated { .. } => "dish_updated",
            Self::DishDeleted { .. } => "dish_deleted",
            Self::CategoryCreated { .. } => "category_created",
            Self::PreferencesSaved => "preferences_saved",
            Self::DefaultsSeeded(_) => "defaults_seeded",
        }
    }
}

/// Receiver of change events. Any `Fn(&ChangeEvent)` closure qualifies.
pub trait ChangeListener {
    fn on_change(&self, event: &ChangeEvent);
}

impl<F: Fn(&ChangeEvent)> ChangeListener for F {
    fn on_change(&self, event: &ChangeEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Registry of active listeners.
#[derive(Default)]
pub struct ChangeNotifier {
    next_id: u64,
    listeners: BTreeMap<SubscriptionId, Arc<dyn ChangeListener>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Arc<dyn ChangeListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, listener);
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn emit(&self, event: &ChangeEvent) {
        for listener in self.listeners.values() {
            listener.on_change(event);
        }
    }
}
