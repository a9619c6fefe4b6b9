//! Disk-based recipe store, one JSON file per recipe.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use super::RecipeStore;
use crate::error::StoreError;
use crate::types::MatchedRecipe;

/// A recipe store persisting each recipe as `{id}.json` under one directory.
///
/// Reads are tolerant: a file that fails to parse is skipped with a warning
/// rather than poisoning the whole list, so one corrupt entry cannot take
/// down recipe loading.
#[derive(Debug)]
pub struct JsonDiskStore {
    dir: PathBuf,
}

impl JsonDiskStore {
    /// Create a store rooted at the given directory. The directory is
    /// created lazily on first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Get the default store directory: ~/.larder/recipes
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".larder").join("recipes"))
            .unwrap_or_else(|| PathBuf::from("data/recipes"))
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

#[async_trait]
impl RecipeStore for JsonDiskStore {
    async fn fetch_all(&self, owner_id: Option<&str>) -> Result<Vec<MatchedRecipe>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        let mut recipes = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }

            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping unreadable recipe file"
                    );
                    continue;
                }
            };

            match serde_json::from_str::<MatchedRecipe>(&content) {
                Ok(recipe) => {
                    let keep = match owner_id {
                        Some(owner) => recipe.owner_id.as_deref() == Some(owner),
                        None => true,
                    };
                    if keep {
                        recipes.push(recipe);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping unparseable recipe file"
                    );
                }
            }
        }

        Ok(recipes)
    }

    async fn insert_many(&self, recipes: &[MatchedRecipe]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        for recipe in recipes {
            let json = serde_json::to_string_pretty(recipe)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            fs::write(self.path_for(recipe.id), json)
                .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        }
        Ok(())
    }

    async fn delete_one(&self, id: Uuid) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::DeleteFailed {
                id,
                reason: e.to_string(),
            }),
        }
    }
}
