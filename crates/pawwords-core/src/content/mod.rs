//! Generative content collaborator.
//!
//! The core never needs this to function: every method either degrades to
//! `None` (the caller falls back to the word's static fields) or reports a
//! recoverable error. Implementations are expected to cache by term so
//! opportunistic prefetching makes later lookups cheap.

pub mod gemini;

pub use gemini::GeminiClient;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Provider-enriched details for a single word.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDetails {
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub roots: Option<String>,
    #[serde(default)]
    pub meanings: Vec<crate::vocab::WordMeaning>,
    #[serde(default)]
    pub english_definition: Option<String>,
    #[serde(default)]
    pub example_zh: Option<String>,
}

/// One bilingual sentence of a generated story.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorySentence {
    pub en: String,
    pub zh: String,
}

/// A short immersion story woven from session words.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    #[serde(default)]
    pub sentences: Vec<StorySentence>,
    #[serde(default)]
    pub full_zh: String,
}

/// Contract between the core and a generative content service.
///
/// Implementations are synchronous; callers that want fire-and-forget
/// prefetching run `prefetch` on their own detached thread.
pub trait ContentProvider: Send + Sync {
    /// Fetch enriched details for a term. `Ok(None)` means the provider
    /// could not help right now; the caller uses static fields instead.
    fn fetch_details(&self, term: &str) -> Result<Option<WordDetails>, ContentError>;

    /// Warm the cache for a term. Best-effort, result never consulted.
    fn prefetch(&self, term: &str) {
        let _ = self.fetch_details(term);
    }

    /// Generate an immersion story using all the given terms.
    fn generate_story(&self, terms: &[String]) -> Result<Story, ContentError>;
}
