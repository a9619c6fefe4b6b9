pub mod candidates;
pub mod config;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod limiter;
pub mod matcher;
pub mod orchestrator;
pub mod pantry;
pub mod planner;
pub mod ranker;
pub mod search;
pub mod store;
pub mod types;

pub use config::EngineConfig;
pub use engine::RecipeEngine;
pub use error::{EngineError, SearchError, StoreError};
pub use inventory::{MemoryPantry, PantryEvent, PantryInventory};
pub use pantry::{expiring_terms, NormalizedIngredientSet, STAPLES};
pub use planner::{plan_queries, MAX_QUERIES};
pub use search::{
    create_search_from_env, parse_search_response, sample_hit, EdamamClient, MockOutcome,
    MockSearch, RecipeSearch, SearchConfig,
};
pub use store::{JsonDiskStore, MemoryStore, RecipeStore};
pub use types::{MatchedRecipe, PantryItem, RecipeCandidate, StructuredIngredient};
