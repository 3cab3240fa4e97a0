/// The fixed output-shape instruction for recipe extraction.
///
/// Loaded from `prompt.txt` at compile time using the `include_str!` macro,
/// making it easy to edit without dealing with Rust string syntax. It pins
/// the exact JSON key set the normalizer expects, and the
/// `{ "error": ... }` escape hatch for non-recipe transcripts.
pub const RECIPE_SCHEMA_PROMPT: &str = include_str!("prompt.txt");

/// Transcripts are cut at this many characters before being embedded, to
/// bound prompt size. Raw character count; long transcripts lose their tail.
pub const TRANSCRIPT_CHAR_LIMIT: usize = 10_000;

/// Build the full extraction prompt for one transcript.
///
/// Deterministic: the same transcript and locale always produce the same
/// prompt. No chunking or retry is attempted for over-long transcripts.
pub fn build_extraction_prompt(transcript: &str, locale: &str) -> String {
    format!(
        "You are a professional chef data assistant.\n\
         Analyze the following cooking-video transcript and extract the recipe \
         information into a structured JSON format.\n\n\
         Transcript:\n\"{}\"\n\n\
         {}\n\
         Translate everything to {}.",
        truncate_chars(transcript, TRANSCRIPT_CHAR_LIMIT),
        RECIPE_SCHEMA_PROMPT,
        locale
    )
}

/// First `limit` characters of `text` (not bytes; never splits a char).
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
