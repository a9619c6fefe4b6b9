//! Fairness limiting: cap how many recipes any one base ingredient can
//! justify, so a pantry full of milk does not produce fifteen milk recipes.

use std::collections::{BTreeMap, HashSet};

use uuid::Uuid;

use crate::pantry::is_staple;
use crate::types::MatchedRecipe;

/// Descriptive words stripped from the edges of an ingredient term when
/// grouping variants ("fresh whole milk" and "skim milk" both group as
/// "milk").
const MODIFIERS: &[&str] = &[
    "fresh",
    "frozen",
    "canned",
    "dried",
    "cooked",
    "raw",
    "organic",
    "plain",
    "greek",
    "whole",
    "skim",
    "low-fat",
    "fat-free",
    "unsweetened",
    "sweetened",
    "vanilla",
    "strawberry",
    "chocolate",
    "extra",
    "virgin",
    "light",
    "heavy",
    "sour",
    "sweet",
    "spicy",
    "mild",
];

fn is_modifier(word: &str) -> bool {
    MODIFIERS.contains(&word)
}

/// Strip leading and trailing modifier words from a term.
///
/// Only edge words are stripped; interior modifiers are part of the name
/// ("sun dried tomato" keeps "dried"). A term made entirely of modifiers
/// falls back to itself rather than collapsing to an empty group key.
pub fn base_ingredient(term: &str) -> String {
    let lowered = term.to_lowercase();
    let mut words: Vec<&str> = lowered.split_whitespace().collect();

    while words.len() > 1 && is_modifier(words[0]) {
        words.remove(0);
    }
    while words.len() > 1 && is_modifier(words[words.len() - 1]) {
        words.pop();
    }
    if words.len() == 1 && is_modifier(words[0]) {
        return lowered.trim().to_string();
    }

    words.join(" ")
}

/// Filter recipes so that no base ingredient justifies more than
/// `max_per_ingredient` of them.
///
/// A recipe survives if any of its used ingredients grants it a slot. Within
/// a group, slots go to recipes using expiring items first, then to recipes
/// using more pantry items, ties broken by input order. Recipes whose used
/// ingredients are all staples belong to no group and are dropped.
pub fn limit_by_ingredient(
    recipes: Vec<MatchedRecipe>,
    max_per_ingredient: usize,
) -> Vec<MatchedRecipe> {
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, recipe) in recipes.iter().enumerate() {
        for term in &recipe.pantry_items_used {
            if is_staple(term) {
                continue;
            }
            let members = groups.entry(base_ingredient(term)).or_default();
            // Two terms of one recipe can share a base; record it once.
            if members.last() != Some(&idx) {
                members.push(idx);
            }
        }
    }

    let mut keep: HashSet<Uuid> = HashSet::new();
    for members in groups.values() {
        let mut ordered: Vec<&MatchedRecipe> = members.iter().map(|&i| &recipes[i]).collect();
        ordered.sort_by(|a, b| {
            b.uses_expiring()
                .cmp(&a.uses_expiring())
                .then_with(|| b.pantry_items_used.len().cmp(&a.pantry_items_used.len()))
        });
        for recipe in ordered.into_iter().take(max_per_ingredient) {
            keep.insert(recipe.id);
        }
    }

    recipes
        .into_iter()
        .filter(|recipe| keep.contains(&recipe.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pantry::NormalizedIngredientSet;
    use crate::types::RecipeCandidate;
    use chrono::Utc;

    fn recipe(label: &str, used: &[&str], expiring: &[&str]) -> MatchedRecipe {
        MatchedRecipe {
            id: Uuid::new_v4(),
            candidate: RecipeCandidate {
                label: label.to_string(),
                ..Default::default()
            },
            pantry_items_used: used.iter().map(|t| t.to_string()).collect(),
            expiring_items_used: expiring.iter().map(|t| t.to_string()).collect(),
            generated_from_snapshot: NormalizedIngredientSet::default(),
            created_at: Utc::now(),
            owner_id: None,
        }
    }

    #[test]
    fn test_base_ingredient_strips_edge_modifiers() {
        assert_eq!(base_ingredient("Fresh Whole Milk"), "milk");
        assert_eq!(base_ingredient("greek yogurt"), "yogurt");
        assert_eq!(base_ingredient("extra virgin olive oil"), "olive oil");
        assert_eq!(base_ingredient("strawberry jam"), "jam");
        assert_eq!(base_ingredient("milk"), "milk");
    }

    #[test]
    fn test_base_ingredient_keeps_interior_modifiers() {
        assert_eq!(base_ingredient("sun dried tomato"), "sun dried tomato");
    }

    #[test]
    fn test_base_ingredient_all_modifiers_falls_back_to_term() {
        assert_eq!(base_ingredient("light"), "light");
        assert_eq!(base_ingredient("Heavy"), "heavy");
    }

    #[test]
    fn test_group_capped_at_max() {
        let recipes: Vec<MatchedRecipe> = (0..8)
            .map(|i| recipe(&format!("milk recipe {i}"), &["milk"], &[]))
            .collect();
        let kept = limit_by_ingredient(recipes, 5);
        assert_eq!(kept.len(), 5);
    }

    #[test]
    fn test_modifier_variants_share_a_group() {
        let mut recipes = vec![recipe("plain", &["milk"], &[])];
        recipes.extend((0..5).map(|i| recipe(&format!("variant {i}"), &["whole milk"], &[])));
        // Six recipes, all grouped under "milk" despite differing terms.
        let kept = limit_by_ingredient(recipes, 5);
        assert_eq!(kept.len(), 5);
    }

    #[test]
    fn test_expiring_users_win_slots() {
        let mut recipes: Vec<MatchedRecipe> = (0..5)
            .map(|i| recipe(&format!("bland {i}"), &["milk"], &[]))
            .collect();
        recipes.push(recipe("urgent", &["milk"], &["milk"]));
        let kept = limit_by_ingredient(recipes, 5);
        assert_eq!(kept.len(), 5);
        assert!(kept.iter().any(|r| r.candidate.label == "urgent"));
        assert!(!kept.iter().any(|r| r.candidate.label == "bland 4"));
    }

    #[test]
    fn test_broader_matches_win_slots() {
        let mut recipes: Vec<MatchedRecipe> = (0..5)
            .map(|i| recipe(&format!("narrow {i}"), &["milk"], &[]))
            .collect();
        recipes.push(recipe("broad", &["milk", "eggs", "flour"], &[]));
        let kept = limit_by_ingredient(recipes, 5);
        assert!(kept.iter().any(|r| r.candidate.label == "broad"));
        assert!(!kept.iter().any(|r| r.candidate.label == "narrow 4"));
    }

    #[test]
    fn test_any_group_slot_rescues_a_recipe() {
        let mut recipes: Vec<MatchedRecipe> = (0..5)
            .map(|i| recipe(&format!("milk {i}"), &["milk", "eggs"], &[]))
            .collect();
        // Loses every milk slot to the broader matches above, but owns the
        // saffron group outright.
        recipes.push(recipe("rescued", &["milk", "saffron"], &[]));
        let kept = limit_by_ingredient(recipes, 5);
        assert!(kept.iter().any(|r| r.candidate.label == "rescued"));
    }

    #[test]
    fn test_staples_never_form_groups() {
        let recipes = vec![
            recipe("staples only", &["salt", "water"], &[]),
            recipe("real", &["flour", "salt"], &[]),
        ];
        let kept = limit_by_ingredient(recipes, 5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].candidate.label, "real");
    }

    #[test]
    fn test_input_order_preserved() {
        let recipes = vec![
            recipe("first", &["milk"], &[]),
            recipe("second", &["eggs"], &[]),
            recipe("third", &["flour"], &[]),
        ];
        let kept = limit_by_ingredient(recipes, 5);
        let labels: Vec<&str> = kept.iter().map(|r| r.candidate.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
    }
}
