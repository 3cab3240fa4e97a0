//! Response normalization: untrusted generated text in, strict
//! [`ExtractedRecipe`] out.
//!
//! The error split matters to callers: transport failures are reported by
//! the provider, syntactically invalid JSON is `MalformedExtraction`, a
//! model-flagged non-recipe is `NotARecipe`, and well-formed JSON that does
//! not satisfy the contract is `InvalidShape`. Each maps to a different
//! user-facing message at the HTTP boundary.

use log::debug;
use serde_json::Value;

use crate::error::ExtractError;
use crate::model::{ExtractedRecipe, VideoReference};

/// Strip fenced-code delimiters the model sometimes wraps around its JSON
/// (with or without a language tag) and trim surrounding whitespace.
///
/// Idempotent: stripping twice yields the same result as once.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Normalize raw generated text into an [`ExtractedRecipe`].
///
/// The `video_id`, `video_url` and `thumbnail_url` fields are always
/// overwritten from `video`; whatever the model put there is discarded.
pub fn normalize_response(
    raw: &str,
    video: &VideoReference,
) -> Result<ExtractedRecipe, ExtractError> {
    let stripped = strip_code_fences(raw);

    let value: Value = serde_json::from_str(&stripped).map_err(|e| {
        debug!("Unparseable extraction output: {e}");
        ExtractError::MalformedExtraction {
            raw: raw.to_string(),
        }
    })?;

    // A non-empty error field is a domain-level rejection, regardless of
    // what other fields are present.
    if let Some(reason) = value.get("error").and_then(Value::as_str) {
        if !reason.is_empty() {
            return Err(ExtractError::NotARecipe {
                reason: reason.to_string(),
            });
        }
    }

    let mut recipe: ExtractedRecipe = serde_json::from_value(value)
        .map_err(|e| ExtractError::InvalidShape(e.to_string()))?;

    if recipe.title.trim().is_empty() {
        return Err(ExtractError::InvalidShape(
            "title is missing or empty".to_string(),
        ));
    }

    recipe.video_id = video.video_id.clone();
    recipe.video_url = video.watch_url();
    recipe.thumbnail_url = video.thumbnail_url();

    Ok(recipe)
}
