//! Vocabulary data model.
//!
//! A [`Word`] carries two kinds of state: static content (term, meanings,
//! phonetic, example) written once at creation, and spaced-repetition
//! progression (`level`, `is_learned`, timestamps) owned by the scheduler
//! in [`crate::srs`]. Timestamps are epoch milliseconds; 0 means "never
//! reviewed".

pub mod seed;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::srs::MAX_LEVEL;

/// A single sense of a word: part of speech plus a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordMeaning {
    /// Part of speech (e.g. "n.", "v.", "adj.")
    pub pos: String,
    /// Definition in the learner's native language
    pub definition: String,
}

/// A vocabulary item with its spaced-repetition state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    /// Stable identifier, assigned at creation and never reused.
    pub id: Uuid,
    /// The word or phrase itself. Immutable after creation.
    pub term: String,
    #[serde(default)]
    pub meanings: Vec<WordMeaning>,
    #[serde(default)]
    pub phonetic: String,
    #[serde(default)]
    pub example: String,
    /// Progression level, 0 (never reviewed) through [`MAX_LEVEL`].
    #[serde(default)]
    pub level: u8,
    /// False until the word completes a learning session once.
    #[serde(default)]
    pub is_learned: bool,
    /// Epoch milliseconds of the most recent successful review.
    #[serde(default)]
    pub last_reviewed_ms: i64,
    /// Epoch milliseconds before which the word is not due for review.
    #[serde(default)]
    pub next_due_ms: i64,
}

impl Word {
    /// Create a fresh, never-reviewed word.
    pub fn new(term: impl Into<String>, meanings: Vec<WordMeaning>) -> Self {
        Self {
            id: Uuid::new_v4(),
            term: term.into(),
            meanings,
            phonetic: String::new(),
            example: String::new(),
            level: 0,
            is_learned: false,
            last_reviewed_ms: 0,
            next_due_ms: 0,
        }
    }

    /// A graduated word has reached maximum mastery and is permanently
    /// excluded from review scheduling.
    pub fn is_graduated(&self) -> bool {
        self.level >= MAX_LEVEL
    }

    /// Whether the word is eligible for a review at `now_ms`.
    pub fn is_due(&self, now_ms: i64) -> bool {
        self.is_learned && self.next_due_ms <= now_ms && !self.is_graduated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_at_level(level: u8) -> Word {
        Word {
            level,
            is_learned: level > 0,
            ..Word::new("capacity", vec![])
        }
    }

    #[test]
    fn graduated_word_is_never_due() {
        let mut w = word_at_level(MAX_LEVEL);
        w.next_due_ms = 1;
        assert!(w.is_graduated());
        assert!(!w.is_due(i64::MAX));
    }

    #[test]
    fn unlearned_word_is_not_due() {
        let w = word_at_level(0);
        assert!(!w.is_due(i64::MAX));
    }

    #[test]
    fn learned_word_due_once_deadline_passes() {
        let mut w = word_at_level(3);
        w.next_due_ms = 1_000;
        assert!(!w.is_due(999));
        assert!(w.is_due(1_000));
        assert!(w.is_due(1_001));
    }

    #[test]
    fn word_serialization_uses_camel_case() {
        let w = word_at_level(2);
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains("\"isLearned\""));
        assert!(json.contains("\"nextDueMs\""));
        let back: Word = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level, 2);
        assert_eq!(back.term, "capacity");
    }
}
