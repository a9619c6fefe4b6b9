//! Concurrent fetch orchestration for planned queries.
//!
//! All queries run as independent tasks with a join barrier. Rate limiting
//! on one query is recovered locally (that query just contributes nothing);
//! any other failure, including a timeout, fails the whole batch and aborts
//! the in-flight siblings.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::error::SearchError;
use crate::search::RecipeSearch;
use crate::types::RecipeCandidate;

/// Run every query concurrently against the search provider and merge the
/// raw hits.
///
/// Hit order across queries is not guaranteed; dedup and ranking downstream
/// do not depend on it. Dropping the returned future aborts all in-flight
/// queries.
pub async fn fetch_all(
    search: Arc<dyn RecipeSearch>,
    queries: &[String],
    timeout: Duration,
) -> Result<Vec<RecipeCandidate>, SearchError> {
    let mut tasks = JoinSet::new();

    for query in queries {
        let search = search.clone();
        let query = query.clone();
        tasks.spawn(async move {
            let outcome = match tokio::time::timeout(timeout, search.search(&query)).await {
                Ok(result) => result,
                Err(_) => Err(SearchError::Timeout {
                    timeout_secs: timeout.as_secs(),
                }),
            };
            (query, outcome)
        });
    }

    let mut hits = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((query, Ok(candidates))) => {
                tracing::debug!(query, hits = candidates.len(), "query completed");
                hits.extend(candidates);
            }
            Ok((query, Err(SearchError::RateLimited { retry_after_secs }))) => {
                tracing::debug!(query, retry_after_secs, "query rate limited, skipping");
            }
            Ok((query, Err(e))) => {
                tracing::warn!(query, error = %e, "query failed, aborting batch");
                tasks.abort_all();
                return Err(e);
            }
            Err(join_error) => {
                if join_error.is_panic() {
                    std::panic::resume_unwind(join_error.into_panic());
                }
                // Aborted sibling; nothing to record.
            }
        }
    }

    Ok(hits)
}
