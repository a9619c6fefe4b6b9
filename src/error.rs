use thiserror::Error;
use uuid::Uuid;

/// Error type for recipe search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Search request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Search API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Search timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    #[error("Failed to parse search response: {0}")]
    ParseError(String),

    #[error("Search not configured: {0}")]
    NotConfigured(String),
}

/// Error type for the persistent recipe store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store read failed: {0}")]
    ReadFailed(String),

    #[error("Store write failed: {0}")]
    WriteFailed(String),

    #[error("Failed to delete recipe {id}: {reason}")]
    DeleteFailed { id: Uuid, reason: String },

    #[error("Failed to serialize recipe: {0}")]
    Serialization(String),
}

/// Top-level error returned by engine operations.
///
/// Matching, limiting and ranking never fail; only the search fan-out and
/// store-facing calls can surface here.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// A short, actionable message suitable for showing to the user.
    ///
    /// The full error chain stays in logs; callers display this string.
    pub fn user_message(&self) -> String {
        match self {
            EngineError::Search(SearchError::RateLimited { .. }) => {
                "Recipe search is busy right now. Try again in a minute.".to_string()
            }
            EngineError::Search(_) => {
                "Couldn't reach the recipe search service. Check your connection and try again."
                    .to_string()
            }
            EngineError::Store(_) => "Couldn't update your saved recipes. Try again.".to_string(),
        }
    }
}
