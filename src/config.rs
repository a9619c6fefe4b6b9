//! Engine tunables from environment variables.

use std::env;
use std::time::Duration;

/// Default cap on recipes justified by a single base ingredient.
pub const DEFAULT_MAX_PER_INGREDIENT: usize = 5;

/// Default cap on unmatched ingredient lines before a recipe is dropped.
pub const DEFAULT_MAX_MISSING: usize = 3;

/// Default size of the published result list.
pub const DEFAULT_MAX_RESULTS: usize = 15;

/// Default window, in days, within which an item counts as expiring.
pub const DEFAULT_EXPIRING_WITHIN_DAYS: i32 = 3;

/// Default per-query timeout in seconds.
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;

/// Recipe engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Max recipes any one base ingredient may justify.
    pub max_per_ingredient: usize,
    /// Max unmatched ingredient lines before a recipe is dropped.
    pub max_missing: usize,
    /// Max recipes in the published list.
    pub max_results: usize,
    /// Items expiring within this many days count as urgent.
    pub expiring_within_days: i32,
    /// Timeout applied to each individual search query.
    pub search_timeout_secs: u64,
    /// Owner scoping for the persistent store, if any.
    pub owner_id: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_per_ingredient: DEFAULT_MAX_PER_INGREDIENT,
            max_missing: DEFAULT_MAX_MISSING,
            max_results: DEFAULT_MAX_RESULTS,
            expiring_within_days: DEFAULT_EXPIRING_WITHIN_DAYS,
            search_timeout_secs: DEFAULT_SEARCH_TIMEOUT_SECS,
            owner_id: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// All optional:
    /// - `LARDER_MAX_PER_INGREDIENT`: per-ingredient recipe cap (default: 5)
    /// - `LARDER_MAX_MISSING`: missing-ingredient cutoff (default: 3)
    /// - `LARDER_MAX_RESULTS`: published list size (default: 15)
    /// - `LARDER_EXPIRING_WITHIN_DAYS`: expiring window in days (default: 3)
    /// - `LARDER_SEARCH_TIMEOUT_SECS`: per-query timeout (default: 10)
    /// - `LARDER_OWNER_ID`: owner scoping for the store (default: none)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_per_ingredient = env::var("LARDER_MAX_PER_INGREDIENT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_per_ingredient);

        let max_missing = env::var("LARDER_MAX_MISSING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_missing);

        let max_results = env::var("LARDER_MAX_RESULTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_results);

        let expiring_within_days = env::var("LARDER_EXPIRING_WITHIN_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.expiring_within_days);

        let search_timeout_secs = env::var("LARDER_SEARCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.search_timeout_secs);

        let owner_id = env::var("LARDER_OWNER_ID").ok().filter(|v| !v.is_empty());

        Self {
            max_per_ingredient,
            max_missing,
            max_results,
            expiring_within_days,
            search_timeout_secs,
            owner_id,
        }
    }

    /// Per-query timeout as a `Duration`.
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }
}
