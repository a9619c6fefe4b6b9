//! The recipe engine: generation cache, pruning, and the caller-facing API.
//!
//! All public operations serialize through one async mutex, so a pantry add
//! and a removal arriving together cannot interleave their load/generate/
//! prune steps. Within an operation, state writes happen only after every
//! fallible step: a failed or cancelled generation leaves the cache key and
//! the working list exactly as they were.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::candidates::dedup_candidates;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::inventory::{PantryEvent, PantryInventory};
use crate::limiter::limit_by_ingredient;
use crate::matcher::{match_candidate, refresh_expiring};
use crate::orchestrator::fetch_all;
use crate::pantry::{expiring_terms, is_staple, NormalizedIngredientSet};
use crate::planner::plan_queries;
use crate::ranker::rank;
use crate::search::RecipeSearch;
use crate::store::RecipeStore;
use crate::types::{MatchedRecipe, PantryItem};

/// Process-lifetime generation state.
///
/// `recipes` is the full authoritative working list mirroring the store;
/// the published view (limited, ranked, expiry-refreshed) is derived from it
/// on every return, never stored.
#[derive(Debug, Default)]
struct GenerationState {
    initialized: bool,
    last_generated: Option<NormalizedIngredientSet>,
    recipes: Vec<MatchedRecipe>,
}

/// Ingredient-driven recipe discovery engine.
///
/// Owns the generation cache and orchestrates the full pipeline: plan
/// queries, fetch concurrently, dedup, match against the pantry, persist new
/// identities, limit, rank.
pub struct RecipeEngine {
    search: Arc<dyn RecipeSearch>,
    store: Arc<dyn RecipeStore>,
    inventory: Arc<dyn PantryInventory>,
    config: EngineConfig,
    state: Mutex<GenerationState>,
}

impl RecipeEngine {
    /// Create an engine over the given collaborators.
    pub fn new(
        search: Arc<dyn RecipeSearch>,
        store: Arc<dyn RecipeStore>,
        inventory: Arc<dyn PantryInventory>,
        config: EngineConfig,
    ) -> Self {
        Self {
            search,
            store,
            inventory,
            config,
            state: Mutex::new(GenerationState::default()),
        }
    }

    /// Current ranked recipe list, loading from the store on first call.
    ///
    /// Later calls re-derive the published view against a fresh pantry
    /// snapshot (expiry marks move with time) without touching the store.
    pub async fn load_recipes(&self) -> Result<Vec<MatchedRecipe>, EngineError> {
        let mut state = self.state.lock().await;
        let items = self.inventory.current_items().await;
        self.ensure_loaded(&mut state).await?;
        Ok(self.published(&state, &items))
    }

    /// React to a pantry addition or change.
    ///
    /// No-op when the pantry is empty or unchanged since the last successful
    /// generation; otherwise runs a full remote generation.
    pub async fn generate_if_needed(
        &self,
        snapshot: &[PantryItem],
    ) -> Result<Vec<MatchedRecipe>, EngineError> {
        let mut state = self.state.lock().await;
        self.ensure_loaded(&mut state).await?;
        self.generate_locked(&mut state, snapshot).await?;
        Ok(self.published(&state, snapshot))
    }

    /// React to pantry shrinkage: drop recipes that depend on ingredients no
    /// longer present, then regenerate if anything is left in the pantry.
    pub async fn prune_if_needed(
        &self,
        remaining: &[PantryItem],
    ) -> Result<Vec<MatchedRecipe>, EngineError> {
        let mut state = self.state.lock().await;
        self.ensure_loaded(&mut state).await?;
        self.prune_locked(&mut state, remaining).await?;
        Ok(self.published(&state, remaining))
    }

    /// Drop all cached state, reload from the store, and generate against a
    /// fresh inventory snapshot.
    pub async fn force_refresh(&self) -> Result<Vec<MatchedRecipe>, EngineError> {
        let mut state = self.state.lock().await;
        state.initialized = false;
        state.last_generated = None;

        let items = self.inventory.current_items().await;
        self.ensure_loaded(&mut state).await?;
        self.generate_locked(&mut state, &items).await?;
        Ok(self.published(&state, &items))
    }

    /// Remove a recipe the user no longer wants.
    ///
    /// Deliberate curation is not a pantry change, so the generation cache
    /// key stays put.
    pub async fn delete_recipe(&self, id: Uuid) -> Result<Vec<MatchedRecipe>, EngineError> {
        let mut state = self.state.lock().await;
        let items = self.inventory.current_items().await;
        self.ensure_loaded(&mut state).await?;

        self.store.delete_one(id).await?;
        state.recipes.retain(|r| r.id != id);
        tracing::debug!(%id, "deleted recipe");
        Ok(self.published(&state, &items))
    }

    /// Dispatch an inventory change notification to the matching hook.
    pub async fn on_pantry_event(
        &self,
        event: PantryEvent,
    ) -> Result<Vec<MatchedRecipe>, EngineError> {
        match event {
            PantryEvent::ItemAdded { items } => self.generate_if_needed(&items).await,
            PantryEvent::ItemsRemoved { remaining } => self.prune_if_needed(&remaining).await,
        }
    }

    /// Fetch the authoritative list once per process.
    ///
    /// Seeds the cache key from the newest stored recipe's snapshot. That is
    /// a heuristic: it reflects the last set a recipe was actually stored
    /// for, which can differ from the last attempted set if a previous run
    /// was interrupted mid-insert.
    async fn ensure_loaded(&self, state: &mut GenerationState) -> Result<(), EngineError> {
        if state.initialized {
            return Ok(());
        }

        let stored = self.store.fetch_all(self.config.owner_id.as_deref()).await?;
        tracing::debug!(recipes = stored.len(), "loaded stored recipes");

        state.last_generated = stored
            .iter()
            .max_by_key(|r| r.created_at)
            .map(|r| r.generated_from_snapshot.clone());
        state.recipes = stored;
        state.initialized = true;
        Ok(())
    }

    async fn generate_locked(
        &self,
        state: &mut GenerationState,
        items: &[PantryItem],
    ) -> Result<(), EngineError> {
        let current = NormalizedIngredientSet::from_items(items);
        if current.is_empty() {
            tracing::debug!("pantry empty, skipping generation");
            return Ok(());
        }
        if state.last_generated.as_ref() == Some(&current) {
            tracing::debug!("pantry unchanged since last generation, cache hit");
            return Ok(());
        }

        let queries = plan_queries(&current);
        tracing::debug!(
            provider = self.search.provider_name(),
            queries = queries.len(),
            "cache miss, generating"
        );
        let hits = fetch_all(self.search.clone(), &queries, self.config.search_timeout()).await?;
        let candidates = dedup_candidates(hits);

        let expiring = expiring_terms(items, self.config.expiring_within_days);
        let owner = self.config.owner_id.as_deref();
        let matched: Vec<MatchedRecipe> = candidates
            .into_iter()
            .map(|c| match_candidate(c, &current, &expiring, owner))
            .collect();

        // The store does not deduplicate; insert only unknown identities.
        let existing = self.store.fetch_all(owner).await?;
        let known: HashSet<String> = existing.iter().map(|r| r.identity_key()).collect();
        let fresh: Vec<MatchedRecipe> = matched
            .into_iter()
            .filter(|r| !known.contains(&r.identity_key()))
            .collect();

        if !fresh.is_empty() {
            self.store.insert_many(&fresh).await?;
        }
        tracing::debug!(inserted = fresh.len(), "generation complete");

        // Reload rather than merging locally, so the working list cannot
        // drift from what the store actually holds.
        let authoritative = self.store.fetch_all(owner).await?;

        state.recipes = authoritative;
        state.last_generated = Some(current);
        Ok(())
    }

    async fn prune_locked(
        &self,
        state: &mut GenerationState,
        remaining: &[PantryItem],
    ) -> Result<(), EngineError> {
        let current = NormalizedIngredientSet::from_items(remaining);
        let stale: Vec<MatchedRecipe> = state
            .recipes
            .iter()
            .filter(|r| {
                !r.pantry_items_used
                    .iter()
                    .all(|term| is_staple(term) || current.contains(term))
            })
            .cloned()
            .collect();

        if stale.is_empty() {
            tracing::debug!("no stale recipes to prune");
            return Ok(());
        }

        let stale_ids: HashSet<Uuid> = stale.iter().map(|r| r.id).collect();
        state.recipes.retain(|r| !stale_ids.contains(&r.id));
        state.last_generated = None;
        tracing::debug!(pruned = stale.len(), "pruned stale recipes");

        // Best-effort: one failed delete must not block the rest.
        for recipe in &stale {
            if let Err(e) = self.store.delete_one(recipe.id).await {
                tracing::warn!(id = %recipe.id, error = %e, "failed to delete pruned recipe");
            }
        }

        if !current.is_empty() {
            self.generate_locked(state, remaining).await?;
        }
        Ok(())
    }

    /// Derive the caller-visible list: fresh expiry marks, fairness limit,
    /// rank. Pure over the working list; never mutates state.
    fn published(&self, state: &GenerationState, items: &[PantryItem]) -> Vec<MatchedRecipe> {
        let expiring = expiring_terms(items, self.config.expiring_within_days);
        let mut recipes = state.recipes.clone();
        for recipe in &mut recipes {
            refresh_expiring(recipe, &expiring);
        }
        let limited = limit_by_ingredient(recipes, self.config.max_per_ingredient);
        rank(limited, self.config.max_missing, self.config.max_results)
    }
}
