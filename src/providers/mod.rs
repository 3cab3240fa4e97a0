mod gemini;
mod prompt;

pub use gemini::GeminiProvider;
pub use prompt::{build_extraction_prompt, RECIPE_SCHEMA_PROMPT, TRANSCRIPT_CHAR_LIMIT};

use async_trait::async_trait;

use crate::error::ExtractError;

/// Unified trait for generative text providers.
///
/// The pipeline only needs "accepts a text prompt, returns a text
/// completion" — no streaming, no multi-turn state. Kept behind a trait so
/// tests can substitute a canned provider.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Get the provider name (e.g., "gemini")
    fn provider_name(&self) -> &str;

    /// Send the prompt and return the raw textual response. Single attempt,
    /// no retry; any transport or service failure surfaces as
    /// [`ExtractError::ExtractionService`].
    async fn generate(&self, prompt: &str) -> Result<String, ExtractError>;
}
