//! SQLite-backed persistence for the word collection and user stats.
//!
//! Layout:
//! - `words` -- one row per vocabulary item, meanings as a JSON column
//! - `kv` -- small JSON documents: user stats, the parked session engine
//!
//! Loads are tolerant by design: an empty or unreadable collection falls
//! back to the default seed catalog, and a malformed stats document falls
//! back to zeroed stats. Persistence failures never invalidate in-memory
//! state -- callers log and carry on.

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::error::StorageError;
use crate::stats::UserStats;
use crate::vocab::{seed, Word, WordMeaning};

use super::data_dir;

const STATS_KEY: &str = "user_stats";

/// SQLite database for the vocabulary collection and progress stats.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/pawwords/pawwords.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> crate::error::Result<Self> {
        let path = data_dir()?.join("pawwords.db");
        let conn = Connection::open(&path).map_err(|source| StorageError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS words (
                    id               TEXT PRIMARY KEY,
                    term             TEXT NOT NULL,
                    phonetic         TEXT NOT NULL DEFAULT '',
                    example          TEXT NOT NULL DEFAULT '',
                    meanings         TEXT NOT NULL DEFAULT '[]',
                    level            INTEGER NOT NULL DEFAULT 0,
                    is_learned       INTEGER NOT NULL DEFAULT 0,
                    last_reviewed_ms INTEGER NOT NULL DEFAULT 0,
                    next_due_ms      INTEGER NOT NULL DEFAULT 0
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_words_due
                    ON words(is_learned, next_due_ms);",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))
    }

    // === Words ===

    /// Load the full word collection, seeding the default catalog when no
    /// usable state exists.
    ///
    /// Rows with an unparsable id are skipped; a malformed meanings column
    /// degrades to an empty list. Neither surfaces as an error.
    pub fn load_words(&self) -> Result<Vec<Word>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, term, phonetic, example, meanings,
                    level, is_learned, last_reviewed_ms, next_due_ms
             FROM words",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, u8>(5)?,
                row.get::<_, bool>(6)?,
                row.get::<_, i64>(7)?,
                row.get::<_, i64>(8)?,
            ))
        })?;

        let mut words = Vec::new();
        for row in rows {
            let (id, term, phonetic, example, meanings, level, is_learned, last, next) = row?;
            let id = match Uuid::parse_str(&id) {
                Ok(id) => id,
                Err(_) => {
                    log::warn!("skipping word '{term}' with malformed id");
                    continue;
                }
            };
            let meanings: Vec<WordMeaning> =
                serde_json::from_str(&meanings).unwrap_or_else(|_| {
                    log::warn!("malformed meanings for word '{term}', using empty list");
                    Vec::new()
                });
            words.push(Word {
                id,
                term,
                meanings,
                phonetic,
                example,
                level,
                is_learned,
                last_reviewed_ms: last,
                next_due_ms: next,
            });
        }

        if words.is_empty() {
            log::info!("no words found, seeding default catalog");
            words = seed::default_catalog(&mut rand::thread_rng());
            self.save_words(&words)?;
        }
        Ok(words)
    }

    /// Upsert a single word.
    pub fn save_word(&self, word: &Word) -> Result<(), StorageError> {
        let meanings = serde_json::to_string(&word.meanings)
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT INTO words (id, term, phonetic, example, meanings,
                                level, is_learned, last_reviewed_ms, next_due_ms)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(id) DO UPDATE SET
                term = excluded.term,
                phonetic = excluded.phonetic,
                example = excluded.example,
                meanings = excluded.meanings,
                level = excluded.level,
                is_learned = excluded.is_learned,
                last_reviewed_ms = excluded.last_reviewed_ms,
                next_due_ms = excluded.next_due_ms",
            params![
                word.id.to_string(),
                word.term,
                word.phonetic,
                word.example,
                meanings,
                word.level,
                word.is_learned,
                word.last_reviewed_ms,
                word.next_due_ms,
            ],
        )?;
        Ok(())
    }

    /// Upsert the whole collection in one transaction.
    pub fn save_words(&self, words: &[Word]) -> Result<(), StorageError> {
        self.conn.execute_batch("BEGIN")?;
        for word in words {
            if let Err(e) = self.save_word(word) {
                let _ = self.conn.execute_batch("ROLLBACK");
                return Err(e);
            }
        }
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    // === Stats ===

    /// Load user stats, falling back to zeroed defaults when the stored
    /// document is missing or malformed.
    pub fn load_stats(&self) -> Result<UserStats, StorageError> {
        match self.kv_get(STATS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json).unwrap_or_else(|_| {
                log::warn!("malformed stats document, starting from defaults");
                UserStats::default()
            })),
            None => Ok(UserStats::default()),
        }
    }

    pub fn save_stats(&self, stats: &UserStats) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(stats).map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        self.kv_set(STATS_KEY, &json)
    }

    // === Key-value store ===

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::srs;

    #[test]
    fn empty_database_seeds_default_catalog() {
        let db = Database::open_memory().unwrap();
        let words = db.load_words().unwrap();
        assert!(!words.is_empty());
        assert!(words.iter().all(|w| w.level == 0 && !w.is_learned));

        // Second load reads the persisted seed, not a fresh shuffle.
        let again = db.load_words().unwrap();
        assert_eq!(again.len(), words.len());
        let mut ids: Vec<_> = words.iter().map(|w| w.id).collect();
        let mut again_ids: Vec<_> = again.iter().map(|w| w.id).collect();
        ids.sort();
        again_ids.sort();
        assert_eq!(ids, again_ids);
    }

    #[test]
    fn advanced_word_roundtrips() {
        let db = Database::open_memory().unwrap();
        let words = db.load_words().unwrap();
        let advanced = srs::advance(&words[0], 1_000_000);
        db.save_word(&advanced).unwrap();

        let reloaded = db.load_words().unwrap();
        let found = reloaded.iter().find(|w| w.id == advanced.id).unwrap();
        assert_eq!(found.level, 1);
        assert!(found.is_learned);
        assert_eq!(found.last_reviewed_ms, 1_000_000);
        assert_eq!(found.next_due_ms, advanced.next_due_ms);
        assert_eq!(found.meanings, words[0].meanings);
    }

    #[test]
    fn malformed_meanings_degrade_to_empty() {
        let db = Database::open_memory().unwrap();
        db.conn
            .execute(
                "INSERT INTO words (id, term, meanings) VALUES (?1, 'broken', 'not-json')",
                params![Uuid::new_v4().to_string()],
            )
            .unwrap();

        let words = db.load_words().unwrap();
        let broken = words.iter().find(|w| w.term == "broken").unwrap();
        assert!(broken.meanings.is_empty());
    }

    #[test]
    fn malformed_stats_fall_back_to_defaults() {
        let db = Database::open_memory().unwrap();
        db.kv_set(STATS_KEY, "{{{").unwrap();
        assert_eq!(db.load_stats().unwrap(), UserStats::default());
    }

    #[test]
    fn stats_roundtrip() {
        let db = Database::open_memory().unwrap();
        let stats = UserStats {
            reward_points: 62,
            streak: 3,
            total_words: 40,
            last_check_in: chrono::NaiveDate::from_ymd_opt(2026, 8, 29),
        };
        db.save_stats(&stats).unwrap();
        assert_eq!(db.load_stats().unwrap(), stats);
    }

    #[test]
    fn kv_set_get_delete() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.kv_get("session_engine").unwrap(), None);
        db.kv_set("session_engine", "{}").unwrap();
        assert_eq!(db.kv_get("session_engine").unwrap().as_deref(), Some("{}"));
        db.kv_delete("session_engine").unwrap();
        assert_eq!(db.kv_get("session_engine").unwrap(), None);
    }
}
