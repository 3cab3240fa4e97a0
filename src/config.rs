use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Target locale for all extracted text fields
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Request timeout for external calls, in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Generative extraction service settings
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Captioning service settings
    #[serde(default)]
    pub captions: CaptionConfig,
    /// Relational data service settings
    #[serde(default)]
    pub store: StoreConfig,
}

/// Configuration for the Gemini generative endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL for the API endpoint (for custom or proxy endpoints)
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: default_model(),
            base_url: default_gemini_base_url(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Configuration for the captioning service
#[derive(Debug, Deserialize, Clone)]
pub struct CaptionConfig {
    /// Base URL of the timedtext endpoint
    #[serde(default = "default_caption_base_url")]
    pub base_url: String,
    /// Caption language requested from the service
    #[serde(default = "default_caption_lang")]
    pub lang: String,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        CaptionConfig {
            base_url: default_caption_base_url(),
            lang: default_caption_lang(),
        }
    }
}

/// Configuration for the PostgREST-style data service
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    /// Base URL of the REST surface (e.g. https://xyz.supabase.co)
    #[serde(default)]
    pub url: String,
    /// Service key sent as `apikey` and bearer token
    #[serde(default)]
    pub api_key: String,
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPETUBE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPETUBE__GEMINI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RECIPETUBE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

// Default value functions
fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_locale() -> String {
    "Korean".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_model() -> String {
    "gemini-1.5-flash-002".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_caption_base_url() -> String {
    "https://www.youtube.com".to_string()
}

fn default_caption_lang() -> String {
    "ko".to_string()
}
