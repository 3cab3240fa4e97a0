use std::env;
use std::sync::Arc;
use std::time::Duration;

use log::error;

use recipetube::config::AppConfig;
use recipetube::providers::GeminiProvider;
use recipetube::server::{serve, AppState};
use recipetube::store::PostgrestStore;
use recipetube::transcript::CaptionClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = AppConfig::load()?;
    let timeout = Duration::from_secs(config.timeout);

    let captions = CaptionClient::new(&config.captions, timeout);
    let provider = GeminiProvider::new(&config.gemini, timeout)?;

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        // One-shot extraction, printed as JSON
        Some("extract") => {
            let url = args
                .get(2)
                .ok_or("Usage: recipetube extract <video-url>")?;
            let recipe =
                recipetube::extract_recipe(url, &captions, &provider, &config.locale).await?;
            println!("{}", serde_json::to_string_pretty(&recipe)?);
        }
        Some("serve") | None => {
            let state = AppState {
                captions,
                provider: Arc::new(provider),
                store: Arc::new(PostgrestStore::new(&config.store, timeout)),
                locale: config.locale.clone(),
            };
            serve(state, &config.bind_addr).await?;
        }
        Some(other) => {
            error!("Unknown command: {other}");
            return Err(format!("Unknown command: {other}. Use serve or extract.").into());
        }
    }

    Ok(())
}
