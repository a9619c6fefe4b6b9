//! Edamam recipe search client.
//!
//! Speaks the Edamam `recipes/v2` wire format. Numeric fields (`yield`,
//! `totalTime`) arrive as integers, floats, or numeric strings depending on
//! which upstream indexed the recipe, so decoding goes through the flexible
//! helpers instead of plain `u32` fields.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::RecipeSearch;
use crate::error::SearchError;
use crate::types::{flexible, RecipeCandidate, StructuredIngredient};

/// Default Edamam recipe search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.edamam.com/api/recipes/v2";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = "Larder/1.0 (+https://larder.app)";

/// Search client configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Edamam application id.
    pub app_id: String,
    /// Edamam application key.
    pub app_key: String,
    /// Base URL for the search API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl SearchConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `EDAMAM_APP_ID`: Edamam application id
    /// - `EDAMAM_APP_KEY`: Edamam application key
    ///
    /// Optional:
    /// - `LARDER_SEARCH_BASE_URL`: API base URL (default: the public endpoint)
    /// - `LARDER_SEARCH_TIMEOUT_SECS`: request timeout (default: 10)
    pub fn from_env() -> Result<Self, SearchError> {
        let app_id = env::var("EDAMAM_APP_ID")
            .map_err(|_| SearchError::NotConfigured("EDAMAM_APP_ID not set".to_string()))?;
        let app_key = env::var("EDAMAM_APP_KEY")
            .map_err(|_| SearchError::NotConfigured("EDAMAM_APP_KEY not set".to_string()))?;

        let base_url =
            env::var("LARDER_SEARCH_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = env::var("LARDER_SEARCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            app_id,
            app_key,
            base_url,
            timeout_secs,
        })
    }
}

/// Production recipe search client backed by the Edamam API.
#[derive(Debug)]
pub struct EdamamClient {
    config: SearchConfig,
    client: reqwest::Client,
}

impl EdamamClient {
    /// Create a client from an explicit configuration.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { config, client })
    }

    /// Create a client configured from environment variables.
    pub fn from_env() -> Result<Self, SearchError> {
        Self::new(SearchConfig::from_env()?)
    }
}

#[async_trait]
impl RecipeSearch for EdamamClient {
    async fn search(&self, query: &str) -> Result<Vec<RecipeCandidate>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery("empty query".to_string()));
        }

        tracing::debug!(query, "network: searching recipes");
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("type", "public"),
                ("q", query),
                ("app_id", self.config.app_id.as_str()),
                ("app_key", self.config.app_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok());
            tracing::debug!(query, retry_after_secs, "network: search rate limited");
            return Err(SearchError::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::debug!(query, status = status.as_u16(), "network: search failed");
            return Err(SearchError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let candidates = parse_search_response(&body)?;
        tracing::debug!(query, hits = candidates.len(), "network: search completed");
        Ok(candidates)
    }

    fn provider_name(&self) -> &'static str {
        "edamam"
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    recipe: WireRecipe,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecipe {
    label: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default, rename = "yield", deserialize_with = "flexible::opt_uint")]
    recipe_yield: Option<u32>,
    #[serde(default, deserialize_with = "flexible::opt_uint")]
    total_time: Option<u32>,
    #[serde(default)]
    ingredient_lines: Vec<String>,
    #[serde(default)]
    ingredients: Vec<WireIngredient>,
    #[serde(default)]
    cuisine_type: Vec<String>,
    #[serde(default)]
    meal_type: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WireIngredient {
    #[serde(default)]
    food: Option<String>,
}

impl From<WireRecipe> for RecipeCandidate {
    fn from(wire: WireRecipe) -> Self {
        RecipeCandidate {
            label: wire.label,
            source_url: wire.url,
            source_publisher: wire.source,
            image: wire.image,
            recipe_yield: wire.recipe_yield,
            total_time_minutes: wire.total_time,
            ingredient_lines: wire.ingredient_lines,
            structured_ingredients: wire
                .ingredients
                .into_iter()
                .map(|i| StructuredIngredient { food: i.food })
                .collect(),
            cuisine_type: wire.cuisine_type,
            meal_type: wire.meal_type,
        }
    }
}

/// Parse a raw search response body into recipe candidates.
pub fn parse_search_response(body: &str) -> Result<Vec<RecipeCandidate>, SearchError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| SearchError::ParseError(e.to_string()))?;
    Ok(response
        .hits
        .into_iter()
        .map(|hit| hit.recipe.into())
        .collect())
}
