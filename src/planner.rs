//! Query planning: turns the normalized pantry set into a bounded list of
//! search queries.
//!
//! Queries are generated in tiers (singles, then pairs, then small triples)
//! so that the most broadly useful combinations come first, and the whole
//! plan is capped to keep each generation within the remote call budget.

use crate::pantry::NormalizedIngredientSet;

/// Hard cap on queries per generation.
pub const MAX_QUERIES: usize = 6;

/// Triples are only worth their API calls for small pantries; above this
/// many items the pair tier already saturates the cap.
const TRIPLE_MIN_ITEMS: usize = 3;
const TRIPLE_MAX_ITEMS: usize = 4;

/// Plan the search queries for one generation.
///
/// Tier order: one query per term; one per unordered pair (index order) when
/// there are at least two terms; one per unordered triple when the pantry has
/// 3 or 4 items. The concatenated sequence is truncated to [`MAX_QUERIES`].
/// Multi-term queries join their terms with a single space.
pub fn plan_queries(set: &NormalizedIngredientSet) -> Vec<String> {
    let terms = set.terms();
    let n = terms.len();
    let mut queries: Vec<String> = Vec::new();

    for term in terms {
        queries.push(term.clone());
    }

    if n >= 2 {
        for i in 0..n {
            for j in (i + 1)..n {
                queries.push(format!("{} {}", terms[i], terms[j]));
            }
        }
    }

    if (TRIPLE_MIN_ITEMS..=TRIPLE_MAX_ITEMS).contains(&n) {
        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    queries.push(format!("{} {} {}", terms[i], terms[j], terms[k]));
                }
            }
        }
    }

    queries.truncate(MAX_QUERIES);
    queries
}
