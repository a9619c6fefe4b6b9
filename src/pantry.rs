//! Pantry snapshot normalization.
//!
//! Converts raw inventory snapshots into the normalized term set the rest of
//! the engine works with: lowercase, generic-name-preferred, deduplicated,
//! first-appearance order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::PantryItem;

/// Ingredients assumed always on hand. Matched against recipes like pantry
/// terms, but exempt from fairness limiting and never considered expiring.
pub const STAPLES: [&str; 4] = ["water", "salt", "pepper", "sugar"];

/// Whether a normalized term is one of the fixed staples.
pub fn is_staple(term: &str) -> bool {
    STAPLES.contains(&term)
}

/// The matching key for a pantry item: generic name when the classifier
/// produced one, display name otherwise. Lowercased and trimmed; empty when
/// the item has no usable name.
fn normalized_term(item: &PantryItem) -> String {
    item.generic_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(item.display_name.trim())
        .to_lowercase()
}

/// An ordered, deduplicated set of lowercase pantry search terms.
///
/// Insertion order (first appearance in the snapshot) drives query planning;
/// equality is unordered because the generation cache only cares about
/// content, not the order items were scanned in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedIngredientSet {
    terms: Vec<String>,
}

impl NormalizedIngredientSet {
    /// Build the normalized set from an inventory snapshot.
    pub fn from_items(items: &[PantryItem]) -> Self {
        let mut terms = Vec::new();
        for item in items {
            let term = normalized_term(item);
            if !term.is_empty() && !terms.contains(&term) {
                terms.push(term);
            }
        }
        Self { terms }
    }

    /// Build from pre-normalized terms; lowercases and deduplicates.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if !term.is_empty() && !out.contains(&term) {
                out.push(term);
            }
        }
        Self { terms: out }
    }

    /// Terms in first-appearance order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }
}

impl PartialEq for NormalizedIngredientSet {
    /// Unordered comparison: `{milk, eggs}` equals `{eggs, milk}`.
    fn eq(&self, other: &Self) -> bool {
        let a: BTreeSet<&str> = self.terms.iter().map(String::as_str).collect();
        let b: BTreeSet<&str> = other.terms.iter().map(String::as_str).collect();
        a == b
    }
}

impl Eq for NormalizedIngredientSet {}

/// Normalized terms of items that are close to their expiration date.
///
/// A term counts as expiring while the item has `within_days` or fewer days
/// left and has not already expired; urgency ranking is about using things
/// up in time, not about salvaging spoiled food.
pub fn expiring_terms(items: &[PantryItem], within_days: i32) -> BTreeSet<String> {
    items
        .iter()
        .filter(|item| !item.is_expired && item.days_until_expiration <= within_days)
        .map(normalized_term)
        .filter(|term| !term.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(display: &str, generic: Option<&str>, days: i32, expired: bool) -> PantryItem {
        PantryItem {
            display_name: display.to_string(),
            generic_name: generic.map(|g| g.to_string()),
            days_until_expiration: days,
            is_expired: expired,
        }
    }

    #[test]
    fn test_generic_name_preferred_over_display_name() {
        let items = vec![
            item("Organic Valley 2% Milk", Some("milk"), 5, false),
            item("Large Brown Eggs", None, 10, false),
        ];
        let set = NormalizedIngredientSet::from_items(&items);
        assert_eq!(set.terms(), &["milk", "large brown eggs"]);
    }

    #[test]
    fn test_blank_generic_name_falls_back() {
        let items = vec![item("Eggs", Some("  "), 10, false)];
        let set = NormalizedIngredientSet::from_items(&items);
        assert_eq!(set.terms(), &["eggs"]);
    }

    #[test]
    fn test_duplicates_keep_first_appearance_order() {
        let items = vec![
            item("Whole Milk", Some("milk"), 5, false),
            item("Eggs", None, 10, false),
            item("Skim Milk", Some("milk"), 2, false),
        ];
        let set = NormalizedIngredientSet::from_items(&items);
        assert_eq!(set.terms(), &["milk", "eggs"]);
    }

    #[test]
    fn test_equality_is_unordered() {
        let a = NormalizedIngredientSet::from_terms(["milk", "eggs", "flour"]);
        let b = NormalizedIngredientSet::from_terms(["flour", "milk", "eggs"]);
        let c = NormalizedIngredientSet::from_terms(["milk", "eggs"]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_expiring_terms_respect_threshold() {
        let items = vec![
            item("Milk", None, 2, false),
            item("Eggs", None, 3, false),
            item("Flour", None, 90, false),
            item("Old Yogurt", Some("yogurt"), -1, true),
        ];
        let expiring = expiring_terms(&items, 3);
        assert!(expiring.contains("milk"));
        assert!(expiring.contains("eggs"));
        assert!(!expiring.contains("flour"));
        // Already-expired items are not "expiring" for urgency purposes.
        assert!(!expiring.contains("yogurt"));
    }

    #[test]
    fn test_staples() {
        assert!(is_staple("salt"));
        assert!(is_staple("water"));
        assert!(!is_staple("milk"));
    }
}
