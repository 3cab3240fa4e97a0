use thiserror::Error;

/// Which of the three ordered persistence writes failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStage {
    Recipe,
    Ingredients,
    Steps,
}

impl std::fmt::Display for PersistStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistStage::Recipe => write!(f, "recipe"),
            PersistStage::Ingredients => write!(f, "ingredients"),
            PersistStage::Steps => write!(f, "steps"),
        }
    }
}

/// Errors that can occur during recipe extraction and persistence
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The request body carried no URL at all
    #[error("URL is required")]
    UrlRequired,

    /// No supported video URL shape matched the input
    #[error("Invalid YouTube URL")]
    InvalidReference,

    /// The captioning service errored or returned no caption fragments
    #[error("Failed to fetch transcript. Video might not have captions.")]
    TranscriptUnavailable(String),

    /// Transport or service failure from the generative endpoint
    #[error("Extraction service error: {0}")]
    ExtractionService(String),

    /// The generated text was not parseable as JSON; carries the raw text
    /// so the caller can log it (it is never shown to clients)
    #[error("Malformed extraction output")]
    MalformedExtraction { raw: String },

    /// The model flagged the transcript as not containing a recipe
    #[error("{reason}")]
    NotARecipe { reason: String },

    /// Well-formed JSON that does not satisfy the recipe contract
    #[error("Extracted recipe has invalid shape: {0}")]
    InvalidShape(String),

    /// One of the three store writes failed
    #[error("Persistence failed at {stage} stage: {message}")]
    Persistence {
        stage: PersistStage,
        message: String,
    },

    /// The named chef does not exist in the store
    #[error("Chef not found: {0}")]
    ChefNotFound(String),

    /// A store read (select or count) failed
    #[error("Store error: {0}")]
    Store(String),

    /// HTTP transport error talking to an external service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ExtractError {
    pub fn persistence(stage: PersistStage, message: impl Into<String>) -> Self {
        ExtractError::Persistence {
            stage,
            message: message.into(),
        }
    }
}
