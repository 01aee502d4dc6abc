//! Process configuration from the environment

use crate::translate::DEFAULT_LOOKUP_URL;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TRANSLATE_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_TRANSLATE_LANG: &str = "en-ru";

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub db_path: PathBuf,
    pub port: u16,
    /// Dictionary API key; lookups are disabled without one
    pub translate_api_key: Option<String>,
    pub translate_url: String,
    pub translate_lang: String,
    pub translate_timeout: Duration,
}

impl BotConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = var("VOCAB_DB_PATH").map_or_else(
            || {
                let home = var("HOME").unwrap_or_else(|| "/tmp".to_string());
                PathBuf::from(home).join(".vocab-trainer").join("vocab.db")
            },
            PathBuf::from,
        );

        let port = var("VOCAB_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let translate_timeout = var("TRANSLATE_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .map_or(DEFAULT_TRANSLATE_TIMEOUT, Duration::from_secs);

        Self {
            db_path,
            port,
            translate_api_key: var("TRANSLATE_TOKEN").filter(|k| !k.is_empty()),
            translate_url: var("TRANSLATE_URL").unwrap_or_else(|| DEFAULT_LOOKUP_URL.to_string()),
            translate_lang: var("TRANSLATE_LANG")
                .unwrap_or_else(|| DEFAULT_TRANSLATE_LANG.to_string()),
            translate_timeout,
        }
    }
}
