//! # PawWords Core Library
//!
//! Core business logic for PawWords, a vocabulary trainer built on spaced
//! repetition. All operations are available through the standalone CLI
//! binary; any richer front end is expected to be a thin layer over this
//! same library.
//!
//! ## Architecture
//!
//! - **Scheduler** (`srs`): pure state-transition logic -- level
//!   progression, due-time computation, session word selection. The clock
//!   and RNG are always explicit arguments.
//! - **Session engine** (`session`): drives one learning or review pass
//!   over a fixed word set and computes rewards and the daily streak on
//!   completion. Serializable, so callers can park it between invocations.
//! - **Storage** (`storage`): SQLite word collection + stats, TOML config.
//! - **Content** (`content`): optional generative enrichment with graceful
//!   degradation; the core never blocks on it.
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: session state machine
//! - [`Database`]: word collection and stats persistence
//! - [`Config`]: application configuration
//! - [`ContentProvider`]: trait for generative content services

pub mod content;
pub mod error;
pub mod session;
pub mod srs;
pub mod stats;
pub mod storage;
pub mod vocab;

pub use content::{ContentProvider, GeminiClient, Story, WordDetails};
pub use error::{ConfigError, ContentError, CoreError, StorageError};
pub use session::{CompleteOutcome, SessionEngine, SessionMode, SessionState, SessionSummary};
pub use stats::UserStats;
pub use storage::{Config, Database};
pub use vocab::{Word, WordMeaning};
