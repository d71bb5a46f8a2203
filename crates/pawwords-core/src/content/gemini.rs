//! Gemini REST client.
//!
//! Thin blocking client over the `generateContent` endpoint with an
//! in-memory per-term cache. Detail lookups degrade to `Ok(None)` on any
//! transport or parse failure so a session can always proceed on static
//! word fields alone.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use super::{ContentProvider, Story, WordDetails};
use crate::error::ContentError;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
    details_cache: Mutex<HashMap<String, WordDetails>>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Build a client from an API key and model name. The key typically
    /// comes from `content.api_key` in the config or the GEMINI_API_KEY
    /// environment variable.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::blocking::Client::new()),
            api_key: api_key.into(),
            model: model.into(),
            details_cache: Mutex::new(HashMap::new()),
        }
    }

    /// POST a prompt and return the first candidate's text. Responses are
    /// always requested as JSON; both payloads here have a schema.
    fn generate(&self, prompt: &str) -> Result<String, ContentError> {
        let url = format!(
            "{API_BASE}/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" },
        });

        let response: GenerateResponse = self
            .http
            .post(&url)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| ContentError::MalformedResponse("no candidate text".to_string()))
    }
}

impl ContentProvider for GeminiClient {
    fn fetch_details(&self, term: &str) -> Result<Option<WordDetails>, ContentError> {
        if let Some(cached) = self
            .details_cache
            .lock()
            .ok()
            .and_then(|cache| cache.get(term).cloned())
        {
            return Ok(Some(cached));
        }

        let prompt = format!(
            "Provide details for English word \"{term}\" as JSON with keys \
             synonyms (array of strings), roots (string), meanings (array of \
             {{pos, definition}} with Chinese definitions), englishDefinition \
             (string), exampleZh (Chinese translation of a usage example)."
        );

        let text = match self.generate(&prompt) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("word detail fetch failed for '{term}': {e}");
                return Ok(None);
            }
        };
        match serde_json::from_str::<WordDetails>(&text) {
            Ok(details) => {
                if let Ok(mut cache) = self.details_cache.lock() {
                    cache.insert(term.to_string(), details.clone());
                }
                Ok(Some(details))
            }
            Err(e) => {
                log::warn!("unusable word detail payload for '{term}': {e}");
                Ok(None)
            }
        }
    }

    fn generate_story(&self, terms: &[String]) -> Result<Story, ContentError> {
        let prompt = format!(
            "Write a short story with pets using ALL of these words: {}. \
             Mark each usage in brackets like [word]. Respond as JSON with \
             sentences (array of {{en, zh}}) and fullZh (the whole story in \
             Chinese).",
            terms.join(", ")
        );
        let text = self.generate(&prompt)?;
        serde_json::from_str(&text)
            .map_err(|e| ContentError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_payload_parses_from_provider_json() {
        let text = r#"{
            "synonyms": ["volume", "capability"],
            "roots": "cap- (take, hold)",
            "meanings": [{"pos": "n.", "definition": "容量"}],
            "englishDefinition": "the amount something can hold",
            "exampleZh": "这个体育场能容纳五万人。"
        }"#;
        let details: WordDetails = serde_json::from_str(text).unwrap();
        assert_eq!(details.synonyms.len(), 2);
        assert_eq!(details.meanings[0].pos, "n.");
        assert!(details.english_definition.is_some());
    }

    #[test]
    fn partial_details_payload_still_parses() {
        let details: WordDetails = serde_json::from_str("{\"synonyms\": []}").unwrap();
        assert!(details.synonyms.is_empty());
        assert!(details.roots.is_none());
    }

    #[test]
    fn story_payload_parses_from_provider_json() {
        let text = r#"{
            "sentences": [{"en": "The cat showed great [capacity].", "zh": "这只猫展现了巨大的[容量]。"}],
            "fullZh": "这只猫展现了巨大的容量。"
        }"#;
        let story: Story = serde_json::from_str(text).unwrap();
        assert_eq!(story.sentences.len(), 1);
        assert!(!story.full_zh.is_empty());
    }
}
