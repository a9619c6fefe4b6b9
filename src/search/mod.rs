//! Recipe search abstraction over external recipe APIs.
//!
//! This module provides a trait-based abstraction over recipe search
//! providers, with a production Edamam client and a scripted mock for tests.

mod edamam;
mod mock;

pub use edamam::{parse_search_response, EdamamClient, SearchConfig};
pub use mock::{sample_hit, MockOutcome, MockSearch};

use async_trait::async_trait;
use std::fmt;

use crate::error::SearchError;
use crate::types::RecipeCandidate;

/// Trait for recipe search providers.
///
/// Implementations should be stateless and thread-safe; the engine issues
/// several searches concurrently against a single shared instance. A rate
/// limited outcome must be surfaced as `SearchError::RateLimited` so callers
/// can recover it locally instead of failing the whole batch.
#[async_trait]
pub trait RecipeSearch: Send + Sync + fmt::Debug {
    /// Search for recipes matching a free-text ingredient query.
    async fn search(&self, query: &str) -> Result<Vec<RecipeCandidate>, SearchError>;

    /// Get the provider name (e.g., "edamam", "mock").
    fn provider_name(&self) -> &'static str;
}

/// Build a search provider from environment variables.
///
/// - `LARDER_SEARCH_PROVIDER`: "edamam" (default) | "mock"
/// - Edamam credentials and tuning are read by [`SearchConfig::from_env`].
pub fn create_search_from_env() -> Result<Box<dyn RecipeSearch>, SearchError> {
    let provider = std::env::var("LARDER_SEARCH_PROVIDER").unwrap_or_else(|_| "edamam".to_string());

    match provider.as_str() {
        "edamam" => {
            let config = SearchConfig::from_env()?;
            Ok(Box::new(EdamamClient::new(config)?))
        }
        "mock" => Ok(Box::new(MockSearch::default())),
        other => Err(SearchError::NotConfigured(format!(
            "Unknown search provider: {}",
            other
        ))),
    }
}
