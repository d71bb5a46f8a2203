use pawwords_core::storage::Database;
use pawwords_core::Config;

use super::content_provider;

const LAST_SESSION_KEY: &str = "last_session_terms";

/// Generate an immersion story from the most recently completed session's
/// words. Provider trouble degrades to a message, never a failed exit --
/// the story is enrichment, not progress.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    let terms: Vec<String> = match db.kv_get(LAST_SESSION_KEY)? {
        Some(json) => serde_json::from_str(&json).unwrap_or_default(),
        None => Vec::new(),
    };
    if terms.is_empty() {
        println!("no completed session yet; finish one first");
        return Ok(());
    }

    let config = Config::load_or_default();
    let Some(provider) = content_provider(&config) else {
        println!("no content provider configured; set content.api_key or GEMINI_API_KEY");
        return Ok(());
    };

    match provider.generate_story(&terms) {
        Ok(story) => {
            for sentence in &story.sentences {
                println!("{}", sentence.en);
                println!("  {}", sentence.zh);
            }
            if !story.full_zh.is_empty() {
                println!("\n{}", story.full_zh);
            }
        }
        Err(e) => {
            log::warn!("story generation failed: {e}");
            println!("story unavailable right now; try again later");
        }
    }
    Ok(())
}
