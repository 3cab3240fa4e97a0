//! RecipeTube: turns cooking-video URLs into structured recipe records.
//!
//! The pipeline is strictly sequential: parse the video reference, fetch
//! the caption transcript, build the extraction prompt, call the generative
//! service, normalize its output. Persistence is a separate, optional step
//! (see [`persist::save_recipe`]).

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod persist;
pub mod providers;
pub mod server;
pub mod store;
pub mod transcript;
pub mod video;

use log::debug;

pub use crate::error::ExtractError;
pub use crate::model::{ExtractedRecipe, VideoReference};

use crate::providers::{build_extraction_prompt, GenerativeProvider};
use crate::transcript::CaptionClient;

/// Run the extraction pipeline for one video URL.
///
/// Each stage fails fast with its own [`ExtractError`] kind so callers can
/// tell "bad URL" from "no captions" from "service down" from "not a
/// recipe". No retries anywhere; every external call is awaited to
/// completion before the next stage runs.
pub async fn extract_recipe(
    url: &str,
    captions: &CaptionClient,
    provider: &dyn GenerativeProvider,
    locale: &str,
) -> Result<ExtractedRecipe, ExtractError> {
    let video = video::parse_video_url(url)?;
    debug!("Resolved video id {} from {url}", video.video_id);

    let transcript = captions.fetch_transcript(&video.video_id).await?;

    let prompt = build_extraction_prompt(&transcript.text, locale);
    let raw = provider.generate(&prompt).await?;

    normalize::normalize_response(&raw, &video)
}
