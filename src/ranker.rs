//! Final ordering: drop recipes missing too much, surface urgency first.

use crate::types::MatchedRecipe;

/// Filter out recipes with more than `max_missing` unmatched ingredient
/// lines, order the rest by urgency and match strength, and cap the list at
/// `max_results`.
///
/// Sort keys: uses an expiring item, then fewest missing ingredients, then
/// most pantry items used. The sort is stable, so re-ranking an already
/// ranked list leaves it unchanged.
pub fn rank(
    mut recipes: Vec<MatchedRecipe>,
    max_missing: usize,
    max_results: usize,
) -> Vec<MatchedRecipe> {
    recipes.retain(|recipe| recipe.missing_count() <= max_missing);
    recipes.sort_by(|a, b| {
        b.uses_expiring()
            .cmp(&a.uses_expiring())
            .then_with(|| a.missing_count().cmp(&b.missing_count()))
            .then_with(|| b.pantry_items_used.len().cmp(&a.pantry_items_used.len()))
    });
    recipes.truncate(max_results);
    recipes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pantry::NormalizedIngredientSet;
    use crate::types::RecipeCandidate;
    use chrono::Utc;
    use uuid::Uuid;

    fn recipe(label: &str, lines: usize, used: &[&str], expiring: &[&str]) -> MatchedRecipe {
        MatchedRecipe {
            id: Uuid::new_v4(),
            candidate: RecipeCandidate {
                label: label.to_string(),
                ingredient_lines: (0..lines).map(|i| format!("ingredient {i}")).collect(),
                ..Default::default()
            },
            pantry_items_used: used.iter().map(|t| t.to_string()).collect(),
            expiring_items_used: expiring.iter().map(|t| t.to_string()).collect(),
            generated_from_snapshot: NormalizedIngredientSet::default(),
            created_at: Utc::now(),
            owner_id: None,
        }
    }

    fn labels(recipes: &[MatchedRecipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.candidate.label.as_str()).collect()
    }

    #[test]
    fn test_drops_recipes_missing_too_much() {
        let recipes = vec![
            recipe("close", 5, &["milk", "eggs"], &[]),
            recipe("hopeless", 9, &["milk", "eggs"], &[]),
        ];
        let ranked = rank(recipes, 3, 15);
        assert_eq!(labels(&ranked), vec!["close"]);
    }

    #[test]
    fn test_missing_at_threshold_is_kept() {
        let recipes = vec![recipe("borderline", 5, &["milk", "eggs"], &[])];
        let ranked = rank(recipes, 3, 15);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_expiring_sorts_first() {
        let recipes = vec![
            recipe("complete", 2, &["milk", "eggs"], &[]),
            recipe("urgent", 4, &["milk"], &["milk"]),
        ];
        let ranked = rank(recipes, 3, 15);
        assert_eq!(labels(&ranked), vec!["urgent", "complete"]);
    }

    #[test]
    fn test_fewer_missing_beats_more_used() {
        // Both non-expiring: two missing loses to zero missing even though it
        // uses more pantry items in absolute terms.
        let recipes = vec![
            recipe("gappy", 5, &["a", "b", "c"], &[]),
            recipe("tight", 2, &["milk", "eggs"], &[]),
        ];
        let ranked = rank(recipes, 3, 15);
        assert_eq!(labels(&ranked), vec!["tight", "gappy"]);
    }

    #[test]
    fn test_more_used_breaks_missing_ties() {
        let recipes = vec![
            recipe("thin", 3, &["milk", "eggs"], &[]),
            recipe("rich", 5, &["milk", "eggs", "flour", "butter"], &[]),
        ];
        // Both miss exactly one line.
        let ranked = rank(recipes, 3, 15);
        assert_eq!(labels(&ranked), vec!["rich", "thin"]);
    }

    #[test]
    fn test_truncates_to_max_results() {
        let recipes: Vec<MatchedRecipe> = (0..20)
            .map(|i| recipe(&format!("r{i}"), 1, &["milk"], &[]))
            .collect();
        let ranked = rank(recipes, 3, 15);
        assert_eq!(ranked.len(), 15);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let recipes = vec![
            recipe("a", 4, &["milk"], &["milk"]),
            recipe("b", 2, &["milk", "eggs"], &[]),
            recipe("c", 3, &["milk", "eggs"], &[]),
            recipe("d", 3, &["milk"], &[]),
        ];
        let once = rank(recipes, 3, 15);
        let twice = rank(once.clone(), 3, 15);
        assert_eq!(labels(&once), labels(&twice));
        assert!(twice.iter().all(|r| r.missing_count() <= 3));
    }
}
