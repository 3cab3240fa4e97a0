//! Persistence mapping: one [`ExtractedRecipe`] becomes a recipe row plus
//! its ingredient and step rows, written in foreign-key order.

use log::{info, warn};

use crate::error::ExtractError;
use crate::model::{ExtractedRecipe, NewIngredientRow, NewRecipeRow, NewStepRow};
use crate::store::RecipeStore;

/// Expand a recipe into its recipe-row payload for the given owning chef.
///
/// The video thumbnail doubles as the recipe image; crawled recipes are
/// never auto-recommended.
pub fn to_recipe_row(recipe: &ExtractedRecipe, chef_id: &str) -> NewRecipeRow {
    NewRecipeRow {
        title: recipe.title.clone(),
        chef_id: chef_id.to_string(),
        image_url: recipe.thumbnail_url.clone(),
        time: recipe.time.clone(),
        calories: recipe.calories,
        protein: recipe.nutrition.protein.clone(),
        fat: recipe.nutrition.fat.clone(),
        carbs: recipe.nutrition.carbs.clone(),
        is_recommended: false,
        video_url: recipe.video_url.clone(),
    }
}

fn to_ingredient_rows(recipe: &ExtractedRecipe, recipe_id: &str) -> Vec<NewIngredientRow> {
    recipe
        .ingredients
        .iter()
        .map(|ing| NewIngredientRow {
            recipe_id: recipe_id.to_string(),
            name: ing.name.clone(),
            amount: ing.amount.clone(),
        })
        .collect()
}

fn to_step_rows(recipe: &ExtractedRecipe, recipe_id: &str) -> Vec<NewStepRow> {
    recipe
        .steps
        .iter()
        .map(|step| NewStepRow {
            recipe_id: recipe_id.to_string(),
            step_order: step.order,
            description: step.description.clone(),
        })
        .collect()
}

/// Persist a recipe for an explicitly chosen chef.
///
/// Performs the three writes in order: recipe row first (capturing its
/// generated id), then ingredients, then steps. If the recipe row fails,
/// nothing else is written. If a child batch fails afterwards, the recipe
/// row is deleted again so the group appears atomically or not at all; the
/// compensating delete is best-effort and its own failure is only logged.
///
/// Returns the generated recipe id.
pub async fn save_recipe(
    store: &dyn RecipeStore,
    recipe: &ExtractedRecipe,
    chef_id: &str,
) -> Result<String, ExtractError> {
    if !recipe.is_usable() {
        return Err(ExtractError::InvalidShape(
            "recipe needs a title and at least one ingredient or step".to_string(),
        ));
    }

    if !store.chef_exists(chef_id).await? {
        return Err(ExtractError::ChefNotFound(chef_id.to_string()));
    }

    let recipe_id = store.insert_recipe(&to_recipe_row(recipe, chef_id)).await?;

    let children = async {
        store
            .insert_ingredients(&to_ingredient_rows(recipe, &recipe_id))
            .await?;
        store.insert_steps(&to_step_rows(recipe, &recipe_id)).await
    };

    if let Err(err) = children.await {
        warn!("Child write failed for recipe {recipe_id}, rolling back: {err}");
        if let Err(delete_err) = store.delete_recipe(&recipe_id).await {
            warn!("Compensating delete of recipe {recipe_id} failed: {delete_err}");
        }
        return Err(err);
    }

    info!(
        "Saved recipe {recipe_id} ({} ingredients, {} steps) for chef {chef_id}",
        recipe.ingredients.len(),
        recipe.steps.len()
    );
    Ok(recipe_id)
}
