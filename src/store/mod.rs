//! Persistent recipe store abstraction.
//!
//! The engine owns identity-key diffing and pruning decisions; stores only
//! persist and retrieve. A store is never assumed to deduplicate.

mod disk;
mod memory;

pub use disk::JsonDiskStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::MatchedRecipe;

/// Trait for persistent recipe stores, enabling mockability in tests.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Fetch every stored recipe, optionally scoped to an owner.
    async fn fetch_all(&self, owner_id: Option<&str>) -> Result<Vec<MatchedRecipe>, StoreError>;

    /// Insert a batch of recipes. Callers insert only identities they know
    /// to be new.
    async fn insert_many(&self, recipes: &[MatchedRecipe]) -> Result<(), StoreError>;

    /// Delete one recipe by id. Deleting an absent id succeeds.
    async fn delete_one(&self, id: Uuid) -> Result<(), StoreError>;
}
