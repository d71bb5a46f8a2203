pub mod config;
pub mod session;
pub mod stats;
pub mod story;
pub mod words;

use pawwords_core::{Config, ContentProvider, GeminiClient};

/// Epoch milliseconds now. The core takes the clock as an argument; the
/// CLI is the single place that reads it.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Build the content provider from config, if an API key is available.
pub fn content_provider(config: &Config) -> Option<Box<dyn ContentProvider>> {
    let api_key = config
        .content
        .api_key
        .clone()
        .or_else(|| std::env::var("GEMINI_API_KEY").ok())?;
    Some(Box::new(GeminiClient::new(api_key, config.content.model.clone())))
}
