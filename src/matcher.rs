//! Ingredient matching: which pantry items (and staples) a recipe consumes.
//!
//! Pantry terms come from a barcode or photo classifier and rarely match
//! recipe vocabulary exactly, so matching is deliberately loose: containment
//! in either direction against the structured `food` fields, falling back to
//! the free-text ingredient lines.

use std::collections::BTreeSet;

use chrono::Utc;
use uuid::Uuid;

use crate::pantry::{NormalizedIngredientSet, STAPLES};
use crate::types::{MatchedRecipe, RecipeCandidate};

/// Whether the candidate uses the given normalized term.
///
/// The structured ingredient list is authoritative when it matches; the
/// free-text lines are only consulted when it does not.
fn term_is_used(candidate: &RecipeCandidate, term: &str) -> bool {
    let structured_match = candidate.structured_ingredients.iter().any(|ingredient| {
        ingredient
            .food
            .as_deref()
            .map(str::trim)
            .filter(|food| !food.is_empty())
            .is_some_and(|food| {
                let food = food.to_lowercase();
                food.contains(term) || term.contains(food.as_str())
            })
    });

    if structured_match {
        return true;
    }

    candidate
        .ingredient_lines
        .iter()
        .any(|line| line.to_lowercase().contains(term))
}

/// Reconcile a candidate against the current pantry snapshot.
///
/// Every pantry term plus every staple is checked; used terms that are also
/// in the expiring set are recorded as expiring. The resulting recipe gets a
/// fresh id and carries the snapshot it was generated from.
pub fn match_candidate(
    candidate: RecipeCandidate,
    pantry: &NormalizedIngredientSet,
    expiring: &BTreeSet<String>,
    owner_id: Option<&str>,
) -> MatchedRecipe {
    let mut used: BTreeSet<String> = BTreeSet::new();

    for term in pantry.terms() {
        if term_is_used(&candidate, term) {
            used.insert(term.clone());
        }
    }
    for staple in STAPLES {
        if !pantry.contains(staple) && term_is_used(&candidate, staple) {
            used.insert(staple.to_string());
        }
    }

    let expiring_used: BTreeSet<String> = used.intersection(expiring).cloned().collect();

    MatchedRecipe {
        id: Uuid::new_v4(),
        candidate,
        pantry_items_used: used,
        expiring_items_used: expiring_used,
        generated_from_snapshot: pantry.clone(),
        created_at: Utc::now(),
        owner_id: owner_id.map(|o| o.to_string()),
    }
}

/// Recompute the expiring subset of a stored recipe against a fresh
/// expiring-term set.
///
/// Expiry is time-dependent, so this runs on every read path rather than
/// trusting the persisted value.
pub fn refresh_expiring(recipe: &mut MatchedRecipe, expiring: &BTreeSet<String>) {
    recipe.expiring_items_used = recipe
        .pantry_items_used
        .intersection(expiring)
        .cloned()
        .collect();
}
