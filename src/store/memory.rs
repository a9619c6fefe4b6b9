//! In-memory recipe store for testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use super::RecipeStore;
use crate::error::StoreError;
use crate::types::MatchedRecipe;

/// An in-memory recipe store.
///
/// Deletes can be scripted to fail so tests can exercise the best-effort
/// pruning path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    recipes: RwLock<Vec<MatchedRecipe>>,
    fail_deletes: AtomicBool,
}

#[allow(dead_code)]
impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with recipes.
    pub fn with_recipes(recipes: Vec<MatchedRecipe>) -> Self {
        Self {
            recipes: RwLock::new(recipes),
            fail_deletes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent delete fail.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::Relaxed);
    }

    /// Number of stored recipes, ignoring owner scoping.
    pub fn len(&self) -> usize {
        self.recipes.read().unwrap().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn fetch_all(&self, owner_id: Option<&str>) -> Result<Vec<MatchedRecipe>, StoreError> {
        let recipes = self.recipes.read().unwrap();
        Ok(recipes
            .iter()
            .filter(|r| match owner_id {
                Some(owner) => r.owner_id.as_deref() == Some(owner),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn insert_many(&self, recipes: &[MatchedRecipe]) -> Result<(), StoreError> {
        self.recipes.write().unwrap().extend_from_slice(recipes);
        Ok(())
    }

    async fn delete_one(&self, id: Uuid) -> Result<(), StoreError> {
        if self.fail_deletes.load(Ordering::Relaxed) {
            return Err(StoreError::DeleteFailed {
                id,
                reason: "scripted failure".to_string(),
            });
        }
        self.recipes.write().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pantry::NormalizedIngredientSet;
    use crate::types::RecipeCandidate;
    use chrono::Utc;

    fn recipe(label: &str, owner: Option<&str>) -> MatchedRecipe {
        MatchedRecipe {
            id: Uuid::new_v4(),
            candidate: RecipeCandidate {
                label: label.to_string(),
                ..Default::default()
            },
            pantry_items_used: Default::default(),
            expiring_items_used: Default::default(),
            generated_from_snapshot: NormalizedIngredientSet::default(),
            created_at: Utc::now(),
            owner_id: owner.map(|o| o.to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let store = MemoryStore::new();
        store
            .insert_many(&[recipe("a", None), recipe("b", None)])
            .await
            .unwrap();
        assert_eq!(store.fetch_all(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_owner_scoping() {
        let store = MemoryStore::with_recipes(vec![
            recipe("mine", Some("me")),
            recipe("theirs", Some("them")),
            recipe("shared", None),
        ]);
        let mine = store.fetch_all(Some("me")).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].candidate.label, "mine");
        assert_eq!(store.fetch_all(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        let r = recipe("a", None);
        let id = r.id;
        store.insert_many(&[r]).await.unwrap();

        store.delete_one(id).await.unwrap();
        assert!(store.is_empty());
        // Deleting again is not an error.
        store.delete_one(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_scripted_delete_failure() {
        let store = MemoryStore::new();
        let r = recipe("a", None);
        let id = r.id;
        store.insert_many(&[r]).await.unwrap();

        store.fail_deletes(true);
        assert!(store.delete_one(id).await.is_err());
        assert_eq!(store.len(), 1);
    }
}
