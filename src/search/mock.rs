//! Mock recipe search for testing.
//!
//! Outcomes are scripted per query, so tests can exercise partial failures,
//! rate limiting, and timeouts without network access. Every query issued is
//! recorded, letting tests assert on exactly which remote calls happened.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::RecipeSearch;
use crate::error::SearchError;
use crate::types::RecipeCandidate;

/// Scripted outcome for one query.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return these candidates.
    Hits(Vec<RecipeCandidate>),
    /// Fail with a rate-limited error.
    RateLimited,
    /// Fail with a hard API error.
    Error(String),
    /// Never complete; used to exercise timeouts.
    Hang,
}

/// A scripted search provider for testing.
///
/// Queries without a scripted outcome get the default outcome.
#[derive(Debug)]
pub struct MockSearch {
    responses: HashMap<String, MockOutcome>,
    default_outcome: MockOutcome,
    calls: Mutex<Vec<String>>,
}

impl Default for MockSearch {
    fn default() -> Self {
        Self {
            responses: HashMap::new(),
            default_outcome: MockOutcome::Hits(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[allow(dead_code)]
impl MockSearch {
    /// Create a mock that returns no hits for every query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script an outcome for a specific query.
    pub fn with_outcome(mut self, query: &str, outcome: MockOutcome) -> Self {
        self.responses.insert(query.to_string(), outcome);
        self
    }

    /// Script hits for a specific query.
    pub fn with_hits(self, query: &str, hits: Vec<RecipeCandidate>) -> Self {
        self.with_outcome(query, MockOutcome::Hits(hits))
    }

    /// Script a rate-limited failure for a specific query.
    pub fn with_rate_limited(self, query: &str) -> Self {
        self.with_outcome(query, MockOutcome::RateLimited)
    }

    /// Script a hard failure for a specific query.
    pub fn with_error(self, query: &str, message: &str) -> Self {
        self.with_outcome(query, MockOutcome::Error(message.to_string()))
    }

    /// Script a query that never completes.
    pub fn with_hang(self, query: &str) -> Self {
        self.with_outcome(query, MockOutcome::Hang)
    }

    /// Set the outcome for queries without a scripted one.
    pub fn with_default_outcome(mut self, outcome: MockOutcome) -> Self {
        self.default_outcome = outcome;
        self
    }

    /// Queries issued so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of queries issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

/// Build a candidate with the fields the engine cares about. Convenience for
/// scripting mock hits in tests.
pub fn sample_hit(label: &str, source_url: &str, ingredient_lines: &[&str]) -> RecipeCandidate {
    RecipeCandidate {
        label: label.to_string(),
        source_url: Some(source_url.to_string()),
        ingredient_lines: ingredient_lines.iter().map(|l| l.to_string()).collect(),
        ..Default::default()
    }
}

#[async_trait]
impl RecipeSearch for MockSearch {
    async fn search(&self, query: &str) -> Result<Vec<RecipeCandidate>, SearchError> {
        self.calls.lock().unwrap().push(query.to_string());

        let outcome = self
            .responses
            .get(query)
            .unwrap_or(&self.default_outcome)
            .clone();

        match outcome {
            MockOutcome::Hits(hits) => Ok(hits),
            MockOutcome::RateLimited => Err(SearchError::RateLimited {
                retry_after_secs: None,
            }),
            MockOutcome::Error(message) => Err(SearchError::ApiError {
                status: 500,
                message,
            }),
            MockOutcome::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
