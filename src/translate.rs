//! Dictionary lookup for automatic translations
//!
//! Lookups are best-effort: a timeout, an HTTP error or an unexpected payload
//! all mean "no translation", and the user is asked to type one instead.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default Yandex Dictionary lookup endpoint
pub const DEFAULT_LOOKUP_URL: &str = "https://dictionary.yandex.net/api/v1/dicservice.json/lookup";

/// Common interface for translation providers
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `word`, `None` when nothing usable came back
    async fn lookup(&self, word: &str) -> Option<String>;
}

#[async_trait]
impl<T: Translator + ?Sized> Translator for Arc<T> {
    async fn lookup(&self, word: &str) -> Option<String> {
        (**self).lookup(word).await
    }
}

// ============================================================================
// Yandex Dictionary
// ============================================================================

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    def: Vec<Definition>,
}

#[derive(Debug, Deserialize)]
struct Definition {
    #[serde(default)]
    tr: Vec<TranslationEntry>,
}

#[derive(Debug, Deserialize)]
struct TranslationEntry {
    text: String,
}

impl LookupResponse {
    /// First translation of the first definition that has one
    fn first_translation(&self) -> Option<String> {
        self.def
            .iter()
            .flat_map(|d| d.tr.iter())
            .map(|tr| tr.text.trim())
            .find(|text| !text.is_empty())
            .map(str::to_lowercase)
    }
}

/// Yandex Dictionary API client
pub struct YandexDictionary {
    client: Client,
    url: String,
    api_key: String,
    lang: String,
}

impl YandexDictionary {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        lang: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
            lang: lang.into(),
        })
    }

    async fn request(&self, word: &str) -> Result<Option<String>, reqwest::Error> {
        let response: LookupResponse = self
            .client
            .get(&self.url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("lang", self.lang.as_str()),
                ("text", word),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.first_translation())
    }
}

#[async_trait]
impl Translator for YandexDictionary {
    async fn lookup(&self, word: &str) -> Option<String> {
        match self.request(word).await {
            Ok(translation) => translation,
            Err(e) => {
                tracing::warn!(
                    word = %word,
                    timed_out = e.is_timeout(),
                    error = %e,
                    "Dictionary lookup failed"
                );
                None
            }
        }
    }
}

/// Used when no dictionary API key is configured
pub struct DisabledTranslator;

#[async_trait]
impl Translator for DisabledTranslator {
    async fn lookup(&self, word: &str) -> Option<String> {
        tracing::debug!(word = %word, "Dictionary lookup disabled");
        None
    }
}

/// Logging wrapper for translators
pub struct LoggingTranslator {
    inner: Arc<dyn Translator>,
}

impl LoggingTranslator {
    pub fn new(inner: Arc<dyn Translator>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Translator for LoggingTranslator {
    async fn lookup(&self, word: &str) -> Option<String> {
        let start = Instant::now();
        let result = self.inner.lookup(word).await;

        tracing::info!(
            word = %word,
            found = result.is_some(),
            duration_ms = %start.elapsed().as_millis(),
            "Dictionary lookup completed"
        );

        result
    }
}
