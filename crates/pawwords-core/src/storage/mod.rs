mod config;
pub mod database;

pub use config::Config;
pub use database::Database;

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/pawwords[-dev]/` based on PAWWORDS_ENV.
///
/// Set PAWWORDS_ENV=dev to use the development data directory, or
/// PAWWORDS_DATA_DIR to pin an explicit path (tests use this to keep state
/// isolated).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var("PAWWORDS_DATA_DIR") {
        Ok(explicit) => PathBuf::from(explicit),
        Err(_) => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("PAWWORDS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pawwords-dev")
            } else {
                base_dir.join("pawwords")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
