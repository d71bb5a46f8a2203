//! Learning/review session engine.
//!
//! The engine is a small state machine over an immutable word selection:
//!
//! ```text
//! Active(position) -> Active(position + 1) -> ... -> Completed
//! ```
//!
//! Selection happens exactly once at start and is never re-evaluated
//! mid-session. The engine holds ids into the shared word collection, not
//! copies of word state; `complete_current` is the only path that advances
//! a word's spaced-repetition state, and backward navigation never touches
//! the scheduler. The whole struct serializes, so a caller can park it in
//! storage between invocations and resume.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::srs;
use crate::stats::UserStats;
use crate::vocab::Word;

/// Reward points never exceed this per session.
const MAX_REWARD: u64 = 50;
const BASE_REWARD: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionMode {
    /// Introduce words never learned before.
    NewLearning,
    /// Revisit learned words whose review deadline has passed.
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    Active,
    Completed,
}

/// Result of completing the word at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompleteOutcome {
    /// Cursor moved to the next word.
    Advanced { position: usize },
    /// That was the last word; the session is now terminal.
    Finished,
}

/// One bounded pass through a fixed set of words.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEngine {
    mode: SessionMode,
    word_ids: Vec<Uuid>,
    position: usize,
    state: SessionState,
}

impl SessionEngine {
    /// Start a session, selecting its word set exactly once.
    ///
    /// `NewLearning` draws up to `count` unlearned words in random order;
    /// `Review` takes every due word and ignores `count`. An empty
    /// selection produces a session that is already `Completed` -- callers
    /// normally avoid starting one, but it stays harmless if they do.
    pub fn start<R: Rng>(
        mode: SessionMode,
        words: &[Word],
        count: usize,
        rng: &mut R,
        now_ms: i64,
    ) -> Self {
        let selected = match mode {
            SessionMode::NewLearning => srs::select_new_words(words, count, rng),
            SessionMode::Review => srs::select_due_words(words, now_ms),
        };
        let word_ids: Vec<Uuid> = selected.iter().map(|w| w.id).collect();
        let state = if word_ids.is_empty() {
            SessionState::Completed
        } else {
            SessionState::Active
        };
        Self {
            mode,
            word_ids,
            position: 0,
            state,
        }
    }

    // === Queries ===

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.word_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_ids.is_empty()
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    /// Id of the word under the cursor, while the session is active.
    pub fn current_id(&self) -> Option<Uuid> {
        if self.is_completed() {
            return None;
        }
        self.word_ids.get(self.position).copied()
    }

    /// Id of the upcoming word, used for opportunistic content prefetch.
    pub fn peek_next_id(&self) -> Option<Uuid> {
        if self.is_completed() {
            return None;
        }
        self.word_ids.get(self.position + 1).copied()
    }

    /// Every word id in this session, in session order.
    pub fn word_ids(&self) -> &[Uuid] {
        &self.word_ids
    }

    /// Resolve the word under the cursor against the shared collection.
    pub fn current_word<'a>(&self, words: &'a [Word]) -> Option<&'a Word> {
        let id = self.current_id()?;
        words.iter().find(|w| w.id == id)
    }

    // === Commands ===

    /// Complete the word under the cursor: advance its scheduler state in
    /// the shared collection, then move forward or finish the session.
    ///
    /// This is the only call path into [`srs::advance`]. Returns `None`
    /// when the session is already completed.
    pub fn complete_current(&mut self, words: &mut [Word], now_ms: i64) -> Option<CompleteOutcome> {
        let id = self.current_id()?;
        if let Some(slot) = words.iter_mut().find(|w| w.id == id) {
            *slot = srs::advance(slot, now_ms);
        }

        if self.position + 1 < self.word_ids.len() {
            self.position += 1;
            Some(CompleteOutcome::Advanced {
                position: self.position,
            })
        } else {
            self.state = SessionState::Completed;
            Some(CompleteOutcome::Finished)
        }
    }

    /// Step the cursor back one word, floored at 0. Never interacts with
    /// the scheduler: an `advance` already applied stays applied.
    pub fn go_previous(&mut self) {
        if self.state == SessionState::Active {
            self.position = self.position.saturating_sub(1);
        }
    }

    /// Compute the post-session stats. Pure function of (session, stats,
    /// today); the caller persists the result.
    ///
    /// The streak grows at most once per calendar day: finalizing twice on
    /// the same date leaves it unchanged the second time.
    pub fn finalize(&self, stats: &UserStats, today: NaiveDate) -> SessionSummary {
        let word_count = self.word_ids.len() as u64;
        let reward = (BASE_REWARD + word_count / 5).min(MAX_REWARD);
        let streak = if stats.last_check_in == Some(today) {
            stats.streak
        } else {
            stats.streak + 1
        };
        SessionSummary {
            reward,
            word_count,
            stats: UserStats {
                reward_points: stats.reward_points + reward,
                streak,
                total_words: stats.total_words + word_count,
                last_check_in: Some(today),
            },
        }
    }
}

/// Outcome of finalizing a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Points awarded for this session.
    pub reward: u64,
    /// Words completed in this session.
    pub word_count: u64,
    /// Stats after applying the reward and streak rules.
    pub stats: UserStats,
}
