//! Core data model for recipe discovery.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pantry::NormalizedIngredientSet;

/// A pantry item as reported by the inventory collaborator.
///
/// The engine only ever reads snapshots of these; ownership stays with the
/// inventory store. `generic_name` is the preferred matching key when the
/// upstream classifier produced one (e.g. "milk" for "Organic Valley 2%").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    pub display_name: String,
    #[serde(default)]
    pub generic_name: Option<String>,
    /// May be negative once the item is past its date. The expiration
    /// estimation service sends this as an integer, float, or numeric string
    /// depending on the upstream path, so decoding is flexible.
    #[serde(deserialize_with = "flexible::int")]
    pub days_until_expiration: i32,
    #[serde(default)]
    pub is_expired: bool,
}

/// One structured ingredient entry from the search API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StructuredIngredient {
    #[serde(default)]
    pub food: Option<String>,
}

/// A recipe as returned by the search collaborator, before matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCandidate {
    pub label: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub source_publisher: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, rename = "yield")]
    pub recipe_yield: Option<u32>,
    #[serde(default)]
    pub total_time_minutes: Option<u32>,
    #[serde(default)]
    pub ingredient_lines: Vec<String>,
    #[serde(default)]
    pub structured_ingredients: Vec<StructuredIngredient>,
    #[serde(default)]
    pub cuisine_type: Vec<String>,
    #[serde(default)]
    pub meal_type: Vec<String>,
}

impl RecipeCandidate {
    /// Stable identity for deduplication: `lowercase(label)|sourceUrl`.
    ///
    /// Two hits from different queries that share this key are the same
    /// recipe; which one survives dedup is arbitrary.
    pub fn identity_key(&self) -> String {
        format!(
            "{}|{}",
            self.label.to_lowercase(),
            self.source_url.as_deref().unwrap_or("")
        )
    }
}

/// A recipe candidate reconciled against a pantry snapshot.
///
/// Created by the matcher, persisted by the recipe store, and removed by
/// pruning or explicit user deletion. `expiring_items_used` is recomputed
/// against a fresh snapshot on every read path; the stored value is never
/// trusted on its own because expiry is time-dependent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchedRecipe {
    pub id: Uuid,
    #[serde(flatten)]
    pub candidate: RecipeCandidate,
    pub pantry_items_used: BTreeSet<String>,
    pub expiring_items_used: BTreeSet<String>,
    /// The normalized pantry set that was active when this recipe was
    /// generated. Used to seed the generation cache on first load.
    pub generated_from_snapshot: NormalizedIngredientSet,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

impl MatchedRecipe {
    /// Identity key of the underlying candidate.
    pub fn identity_key(&self) -> String {
        self.candidate.identity_key()
    }

    /// Number of recipe ingredient lines not covered by the pantry.
    pub fn missing_count(&self) -> usize {
        self.candidate
            .ingredient_lines
            .len()
            .saturating_sub(self.pantry_items_used.len())
    }

    /// Whether any used pantry item is currently expiring.
    pub fn uses_expiring(&self) -> bool {
        !self.expiring_items_used.is_empty()
    }
}

/// Serde helpers for numeric fields that upstream services send
/// inconsistently as an integer, a float, or a numeric string.
///
/// Used at the wire boundary (pantry day counts, search API yields and
/// times) instead of scattering per-field fallback logic.
pub(crate) mod flexible {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    impl Raw {
        fn as_f64(&self) -> Result<f64, String> {
            match self {
                Raw::Int(i) => Ok(*i as f64),
                Raw::Float(f) => Ok(*f),
                Raw::Text(s) => s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("not a number: {:?}", s)),
            }
        }
    }

    /// Deserialize an i32 from an integer, float, or numeric string.
    pub fn int<'de, D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Raw::deserialize(deserializer)?
            .as_f64()
            .map_err(D::Error::custom)?;
        Ok(value.round() as i32)
    }

    /// Deserialize an optional non-negative count from an integer, float,
    /// numeric string, or null. Fractional values are rounded, negatives
    /// clamped to zero.
    pub fn opt_uint<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => {
                let value = raw.as_f64().map_err(D::Error::custom)?;
                Ok(Some(value.max(0.0).round() as u32))
            }
        }
    }
}
