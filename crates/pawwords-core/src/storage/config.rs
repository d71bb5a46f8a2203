//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Session sizing (how many new words per learning session)
//! - Content provider settings (API key, model)
//!
//! Configuration is stored at `~/.config/pawwords/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Session-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Words drawn into a new-learning session. Review sessions are
    /// uncapped and ignore this.
    #[serde(default = "default_new_words_per_session")]
    pub new_words_per_session: usize,
}

/// Generative content provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// API key for the Gemini provider. Falls back to the GEMINI_API_KEY
    /// environment variable when unset.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pawwords/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

fn default_new_words_per_session() -> usize {
    20
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            new_words_per_session: default_new_words_per_session(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults back on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing config file cannot be parsed, or if
    /// the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "session.new_words_per_session" => Some(self.session.new_words_per_session.to_string()),
            "content.api_key" => self.content.api_key.clone(),
            "content.model" => Some(self.content.model.clone()),
            _ => None,
        }
    }

    /// Set a config value by key and save. Unknown keys are an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "session.new_words_per_session" => {
                let n: usize = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("cannot parse '{value}' as a count"),
                })?;
                if n == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: "must be at least 1".to_string(),
                    }
                    .into());
                }
                self.session.new_words_per_session = n;
            }
            "content.api_key" => {
                self.content.api_key = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "content.model" => {
                self.content.model = value.to_string();
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        }
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.session.new_words_per_session, 20);
        assert_eq!(parsed.content.model, "gemini-3-flash-preview");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(
            cfg.get("session.new_words_per_session").as_deref(),
            Some("20")
        );
        assert!(cfg.get("content.api_key").is_none());
        assert!(cfg.get("session.missing").is_none());
    }

    #[test]
    fn empty_toml_fills_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.session.new_words_per_session, 20);
        assert!(parsed.content.api_key.is_none());
    }
}
