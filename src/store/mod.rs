mod postgrest;

pub use postgrest::PostgrestStore;

use async_trait::async_trait;

use crate::error::ExtractError;
use crate::model::{Chef, NewIngredientRow, NewRecipeRow, NewStepRow, RecipeRow};

/// The generic keyed-record service the pipeline persists into.
///
/// Five operations are consumed: insert-returning-id, batch-insert, select
/// with filter and order, select with limit, and existence count. Nothing
/// SQL-specific leaks through this seam, and tests substitute fakes.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Insert one recipe row and return its generated id.
    async fn insert_recipe(&self, row: &NewRecipeRow) -> Result<String, ExtractError>;

    /// Batch-insert ingredient rows. No generated ids are needed back.
    async fn insert_ingredients(&self, rows: &[NewIngredientRow]) -> Result<(), ExtractError>;

    /// Batch-insert step rows. No generated ids are needed back.
    async fn insert_steps(&self, rows: &[NewStepRow]) -> Result<(), ExtractError>;

    /// Delete a recipe row. Used as the compensating write when a child
    /// batch fails after the recipe row exists.
    async fn delete_recipe(&self, recipe_id: &str) -> Result<(), ExtractError>;

    /// Existence count for a chef id.
    async fn chef_exists(&self, chef_id: &str) -> Result<bool, ExtractError>;

    /// Chefs, bounded by `limit`.
    async fn list_chefs(&self, limit: u32) -> Result<Vec<Chef>, ExtractError>;

    /// Recipes owned by a chef, newest first.
    async fn recipes_for_chef(&self, chef_id: &str) -> Result<Vec<RecipeRow>, ExtractError>;
}
