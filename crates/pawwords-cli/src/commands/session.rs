use clap::Subcommand;
use pawwords_core::storage::Database;
use pawwords_core::{CompleteOutcome, Config, SessionEngine, SessionMode, Word};
use serde_json::json;

use super::{content_provider, now_ms};

const ENGINE_KEY: &str = "session_engine";
const LAST_SESSION_KEY: &str = "last_session_terms";

#[derive(Subcommand)]
pub enum SessionAction {
    /// Start a new session
    Start {
        /// Review due words instead of learning new ones
        #[arg(long)]
        review: bool,
        /// New words to draw (defaults to config; ignored for review)
        #[arg(long)]
        count: Option<usize>,
    },
    /// Show the current session and word
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Complete the current word and move on
    Complete,
    /// Step back to the previous word (no scheduling effect)
    Back,
    /// Abandon the active session
    Abandon,
}

fn load_engine(db: &Database) -> Option<SessionEngine> {
    let json = db.kv_get(ENGINE_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

fn save_engine(db: &Database, engine: &SessionEngine) {
    match serde_json::to_string(engine) {
        Ok(json) => {
            if let Err(e) = db.kv_set(ENGINE_KEY, &json) {
                log::warn!("failed to persist session engine: {e}");
            }
        }
        Err(e) => log::warn!("failed to serialize session engine: {e}"),
    }
}

/// Warm the content cache for the current and upcoming words without ever
/// blocking session flow. Results are never consulted here.
fn prefetch(config: &Config, terms: Vec<String>) {
    if terms.is_empty() {
        return;
    }
    if let Some(provider) = content_provider(config) {
        std::thread::spawn(move || {
            for term in terms {
                provider.prefetch(&term);
            }
        });
    }
}

fn print_word(word: &Word) {
    println!("{}  {}", word.term, word.phonetic);
    for m in &word.meanings {
        println!("  {} {}", m.pos, m.definition);
    }
    if !word.example.is_empty() {
        println!("  e.g. {}", word.example);
    }
}

fn prefetch_targets(engine: &SessionEngine, words: &[Word]) -> Vec<String> {
    [engine.current_id(), engine.peek_next_id()]
        .into_iter()
        .flatten()
        .filter_map(|id| words.iter().find(|w| w.id == id))
        .map(|w| w.term.clone())
        .collect()
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        SessionAction::Start { review, count } => {
            if load_engine(&db).is_some_and(|e| !e.is_completed()) {
                eprintln!("a session is already active; finish it or run `session abandon`");
                std::process::exit(1);
            }

            let config = Config::load_or_default();
            let words = db.load_words()?;
            let mode = if review {
                SessionMode::Review
            } else {
                SessionMode::NewLearning
            };
            let count = count.unwrap_or(config.session.new_words_per_session);
            let engine =
                SessionEngine::start(mode, &words, count, &mut rand::thread_rng(), now_ms());

            if engine.is_empty() {
                match mode {
                    SessionMode::NewLearning => println!("nothing left to learn"),
                    SessionMode::Review => println!("no words due for review"),
                }
                return Ok(());
            }

            save_engine(&db, &engine);
            prefetch(&config, prefetch_targets(&engine, &words));

            println!(
                "session started: {} words ({})",
                engine.len(),
                match mode {
                    SessionMode::NewLearning => "new",
                    SessionMode::Review => "review",
                }
            );
            if let Some(word) = engine.current_word(&words) {
                print_word(word);
            }
        }
        SessionAction::Status { json } => {
            let Some(engine) = load_engine(&db) else {
                println!("no active session");
                return Ok(());
            };
            let words = db.load_words()?;
            if json {
                let current = engine.current_word(&words);
                let snapshot = json!({
                    "mode": engine.mode(),
                    "state": engine.state(),
                    "position": engine.position(),
                    "total": engine.len(),
                    "current": current,
                });
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else if engine.is_completed() {
                println!("session completed");
            } else {
                println!("word {} of {}", engine.position() + 1, engine.len());
                if let Some(word) = engine.current_word(&words) {
                    print_word(word);
                }
            }
        }
        SessionAction::Complete => {
            let Some(mut engine) = load_engine(&db) else {
                eprintln!("no active session; run `session start` first");
                std::process::exit(1);
            };
            let config = Config::load_or_default();
            let mut words = db.load_words()?;

            match engine.complete_current(&mut words, now_ms()) {
                Some(CompleteOutcome::Advanced { position }) => {
                    // The advanced word and the cursor move together; a
                    // failed write is logged and retried on the next
                    // mutation, in-memory state stays authoritative.
                    if let Err(e) = db.save_words(&words) {
                        log::warn!("failed to persist word progress: {e}");
                    }
                    save_engine(&db, &engine);
                    prefetch(&config, prefetch_targets(&engine, &words));

                    println!("word {} of {}", position + 1, engine.len());
                    if let Some(word) = engine.current_word(&words) {
                        print_word(word);
                    }
                }
                Some(CompleteOutcome::Finished) => {
                    if let Err(e) = db.save_words(&words) {
                        log::warn!("failed to persist word progress: {e}");
                    }

                    let stats = db.load_stats().unwrap_or_default();
                    let today = chrono::Utc::now().date_naive();
                    let summary = engine.finalize(&stats, today);
                    if let Err(e) = db.save_stats(&summary.stats) {
                        log::warn!("failed to persist stats: {e}");
                    }

                    let terms: Vec<String> = engine
                        .word_ids()
                        .iter()
                        .filter_map(|id| words.iter().find(|w| w.id == *id))
                        .map(|w| w.term.clone())
                        .collect();
                    if let Ok(json) = serde_json::to_string(&terms) {
                        let _ = db.kv_set(LAST_SESSION_KEY, &json);
                    }
                    if let Err(e) = db.kv_delete(ENGINE_KEY) {
                        log::warn!("failed to clear session engine: {e}");
                    }

                    println!(
                        "session complete! {} words, +{} points, streak {}",
                        summary.word_count, summary.reward, summary.stats.streak
                    );
                }
                None => {
                    eprintln!("session already completed");
                    std::process::exit(1);
                }
            }
        }
        SessionAction::Back => {
            let Some(mut engine) = load_engine(&db) else {
                eprintln!("no active session");
                std::process::exit(1);
            };
            engine.go_previous();
            save_engine(&db, &engine);

            let words = db.load_words()?;
            println!("word {} of {}", engine.position() + 1, engine.len());
            if let Some(word) = engine.current_word(&words) {
                print_word(word);
            }
        }
        SessionAction::Abandon => {
            db.kv_delete(ENGINE_KEY)?;
            println!("session abandoned");
        }
    }
    Ok(())
}
