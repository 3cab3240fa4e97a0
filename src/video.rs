//! Video URL parsing.
//!
//! Extracts a canonical video id from the URL shapes users actually paste:
//! `watch?v=ID`, `youtu.be/ID`, `shorts/ID` and `embed/ID`. Kept as an
//! isolated pure function so new shapes can be added without touching the
//! rest of the pipeline.

use crate::error::ExtractError;
use crate::model::VideoReference;

/// URL markers tried in order; the first one present in the input wins.
const ID_MARKERS: [&str; 4] = ["v=", "youtu.be/", "shorts/", "embed/"];

/// Parse a user-supplied video URL into a [`VideoReference`].
///
/// Case-sensitive on the captured token. Returns
/// [`ExtractError::InvalidReference`] when no known shape matches.
pub fn parse_video_url(url: &str) -> Result<VideoReference, ExtractError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::InvalidReference);
    }

    for marker in ID_MARKERS {
        if let Some(id) = capture_after(trimmed, marker) {
            return Ok(VideoReference {
                raw_url: trimmed.to_string(),
                video_id: id.to_string(),
            });
        }
    }

    Err(ExtractError::InvalidReference)
}

/// Take the token following `marker`, ending at the first `&`, `?` or `/`.
fn capture_after<'a>(url: &'a str, marker: &str) -> Option<&'a str> {
    let start = url.find(marker)? + marker.len();
    let rest = &url[start..];
    let end = rest
        .find(['&', '?', '/'])
        .unwrap_or(rest.len());
    let id = &rest[..end];
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
