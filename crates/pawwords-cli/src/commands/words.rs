use clap::Subcommand;
use pawwords_core::storage::Database;
use pawwords_core::{srs, Config, Word};

use super::{content_provider, now_ms};

#[derive(Subcommand)]
pub enum WordsAction {
    /// List the vocabulary collection
    List {
        /// Only words due for review
        #[arg(long)]
        due: bool,
        /// Only graduated (fully mastered) words
        #[arg(long)]
        mastered: bool,
        /// Only words never learned
        #[arg(long)]
        new: bool,
        #[arg(long)]
        json: bool,
    },
    /// Show one word in full
    Show {
        term: String,
        /// Enrich with provider content (synonyms, roots, definitions)
        #[arg(long)]
        details: bool,
    },
}

fn filtered(words: Vec<Word>, due: bool, mastered: bool, new: bool) -> Vec<Word> {
    let now = now_ms();
    words
        .into_iter()
        .filter(|w| {
            if due {
                w.is_due(now)
            } else if mastered {
                w.is_graduated()
            } else if new {
                !w.is_learned
            } else {
                true
            }
        })
        .collect()
}

pub fn run(action: WordsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        WordsAction::List {
            due,
            mastered,
            new,
            json,
        } => {
            let words = filtered(db.load_words()?, due, mastered, new);
            if json {
                println!("{}", serde_json::to_string_pretty(&words)?);
            } else {
                for w in &words {
                    let status = if w.is_graduated() {
                        "mastered".to_string()
                    } else if w.is_learned {
                        format!("level {}", w.level)
                    } else {
                        "new".to_string()
                    };
                    println!("{:<14} {:<10} {}", w.term, status, w.phonetic);
                }
                println!("{} words", words.len());
            }
        }
        WordsAction::Show { term, details } => {
            let words = db.load_words()?;
            let Some(word) = words.iter().find(|w| w.term == term) else {
                eprintln!("word not found: {term}");
                std::process::exit(1);
            };

            println!("{}  {}", word.term, word.phonetic);
            for m in &word.meanings {
                println!("  {} {}", m.pos, m.definition);
            }
            if !word.example.is_empty() {
                println!("  e.g. {}", word.example);
            }
            if word.is_graduated() {
                println!("  mastered");
            } else if word.is_learned {
                println!(
                    "  level {}/{}, next review in {}",
                    word.level,
                    srs::MAX_LEVEL,
                    format_until(word.next_due_ms - now_ms())
                );
            }

            if details {
                let config = Config::load_or_default();
                // Provider failure is never fatal; the static fields above
                // already stand on their own.
                let fetched = content_provider(&config)
                    .and_then(|provider| provider.fetch_details(&word.term).ok().flatten());
                match fetched {
                    Some(d) => {
                        if !d.synonyms.is_empty() {
                            println!("  synonyms: {}", d.synonyms.join(", "));
                        }
                        if let Some(roots) = &d.roots {
                            println!("  roots: {roots}");
                        }
                        if let Some(def) = &d.english_definition {
                            println!("  def: {def}");
                        }
                        if let Some(zh) = &d.example_zh {
                            println!("  例句: {zh}");
                        }
                    }
                    None => println!("  (no enriched details available)"),
                }
            }
        }
    }
    Ok(())
}

fn format_until(ms: i64) -> String {
    if ms <= 0 {
        return "due now".to_string();
    }
    let mins = ms / 60_000;
    if mins < 60 {
        format!("{mins}m")
    } else if mins < 24 * 60 {
        format!("{}h", mins / 60)
    } else {
        format!("{}d", mins / (24 * 60))
    }
}
