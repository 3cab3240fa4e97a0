use serde::{Deserialize, Serialize};

/// Canonical reference to a source video, derived from a user-supplied URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReference {
    pub raw_url: String,
    pub video_id: String,
}

impl VideoReference {
    /// Canonical watch URL for the referenced video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }

    /// Highest-resolution thumbnail URL for the referenced video.
    pub fn thumbnail_url(&self) -> String {
        format!(
            "https://img.youtube.com/vi/{}/maxresdefault.jpg",
            self.video_id
        )
    }
}

/// Concatenated caption text for one video. Lives only for the duration of
/// a single extraction request.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub video_id: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeStep {
    pub order: u32,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Nutrition {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: String,
    #[serde(default)]
    pub fat: String,
    #[serde(default)]
    pub carbs: String,
}

impl Default for Nutrition {
    fn default() -> Self {
        Nutrition {
            calories: 0.0,
            protein: "0g".to_string(),
            fat: "0g".to_string(),
            carbs: "0g".to_string(),
        }
    }
}

/// The normalized output contract of the extraction pipeline.
///
/// `video_id`, `video_url` and `thumbnail_url` are always derived from the
/// [`VideoReference`], never taken from the generative service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecipe {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
    #[serde(default)]
    pub time: String,
    /// Upstream estimate; 500 is a sentinel for "could not estimate".
    #[serde(default = "default_calories")]
    pub calories: f64,
    #[serde(default)]
    pub nutrition: Nutrition,
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: String,
}

pub(crate) fn default_calories() -> f64 {
    500.0
}

impl ExtractedRecipe {
    /// A recipe is worth persisting only if it has a title and at least one
    /// ingredient or step.
    pub fn is_usable(&self) -> bool {
        !self.title.trim().is_empty() && (!self.ingredients.is_empty() || !self.steps.is_empty())
    }
}

/// A chef row as returned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
}

/// Payload for the recipe row insert. Field names follow the store's
/// column naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipeRow {
    pub title: String,
    pub chef_id: String,
    pub image_url: String,
    pub time: String,
    pub calories: f64,
    pub protein: String,
    pub fat: String,
    pub carbs: String,
    pub is_recommended: bool,
    pub video_url: String,
}

/// Payload for one ingredient row, referencing its owning recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIngredientRow {
    pub recipe_id: String,
    pub name: String,
    pub amount: String,
}

/// Payload for one step row, referencing its owning recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStepRow {
    pub recipe_id: String,
    pub step_order: u32,
    pub description: String,
}

/// A recipe row as read back from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRow {
    pub id: String,
    pub title: String,
    pub chef_id: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub video_url: String,
}
