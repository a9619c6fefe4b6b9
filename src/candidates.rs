//! Candidate deduplication across query results.
//!
//! The same recipe routinely comes back from several of the planned queries;
//! one representative per identity key survives.

use std::collections::HashSet;

use crate::types::RecipeCandidate;

/// Drop duplicate candidates, keeping the first hit seen for each identity
/// key.
///
/// Because the fetch fan-out appends hits in completion order, which
/// duplicate arrives first varies between runs. The survivor is arbitrary
/// but the iteration is stable within a run; callers must not rely on which
/// copy they get, only that keys are unique.
pub fn dedup_candidates(hits: Vec<RecipeCandidate>) -> Vec<RecipeCandidate> {
    let mut seen: HashSet<String> = HashSet::with_capacity(hits.len());
    let mut unique = Vec::with_capacity(hits.len());

    for hit in hits {
        if seen.insert(hit.identity_key()) {
            unique.push(hit);
        }
    }

    unique
}
