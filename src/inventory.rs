//! Pantry inventory collaborator seam.
//!
//! The inventory store is externally owned; the engine only reads snapshots
//! from it and reacts to its change notifications.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::types::PantryItem;

/// A change notification from the inventory store. Both variants carry the
/// full post-change snapshot, so handlers never need a second read to see
/// the new state.
#[derive(Debug, Clone, PartialEq)]
pub enum PantryEvent {
    /// An item was added or updated.
    ItemAdded { items: Vec<PantryItem> },
    /// One or more items were removed.
    ItemsRemoved { remaining: Vec<PantryItem> },
}

/// Trait for pantry inventory collaborators, enabling mockability in tests.
#[async_trait]
pub trait PantryInventory: Send + Sync {
    /// Snapshot of the current pantry contents.
    async fn current_items(&self) -> Vec<PantryItem>;
}

/// An in-memory pantry for tests and single-process use.
#[derive(Debug, Default)]
pub struct MemoryPantry {
    items: RwLock<Vec<PantryItem>>,
}

impl MemoryPantry {
    /// Create an empty pantry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pantry holding the given items.
    pub fn with_items(items: Vec<PantryItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Replace the pantry contents.
    pub fn set_items(&self, items: Vec<PantryItem>) {
        *self.items.write().unwrap() = items;
    }
}

#[async_trait]
impl PantryInventory for MemoryPantry {
    async fn current_items(&self) -> Vec<PantryItem> {
        self.items.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> PantryItem {
        PantryItem {
            display_name: name.to_string(),
            generic_name: None,
            days_until_expiration: 7,
            is_expired: false,
        }
    }

    #[tokio::test]
    async fn test_snapshot_reflects_replacement() {
        let pantry = MemoryPantry::with_items(vec![item("milk")]);
        assert_eq!(pantry.current_items().await.len(), 1);

        pantry.set_items(vec![item("milk"), item("eggs")]);
        let items = pantry.current_items().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].display_name, "eggs");
    }

    #[tokio::test]
    async fn test_empty_pantry() {
        let pantry = MemoryPantry::new();
        assert!(pantry.current_items().await.is_empty());
    }
}
