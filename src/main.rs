//! Vocabulary trainer - chat bot for learning English words
//!
//! A Rust backend driving each chat through a conversation state machine:
//! registration, adding and deleting words, and multiple-choice training.

mod api;
mod config;
mod db;
mod quiz;
mod runtime;
mod state_machine;
mod texts;
mod translate;
mod validators;

use api::{create_router, AppState};
use config::BotConfig;
use db::Database;
use runtime::{ConversationEngine, DatabaseStorage};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use translate::{DisabledTranslator, LoggingTranslator, Translator, YandexDictionary};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vocab_trainer=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = BotConfig::from_env();

    // Ensure database directory exists
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!(path = %config.db_path.display(), "Opening database");
    let db = Database::open(&config.db_path)?;

    if db.ensure_shared_pool()? {
        tracing::info!("Seeded shared word pool");
    }

    let translator: Arc<dyn Translator> = match &config.translate_api_key {
        Some(key) => {
            let dictionary = YandexDictionary::new(
                config.translate_url.clone(),
                key.clone(),
                config.translate_lang.clone(),
                config.translate_timeout,
            )?;
            tracing::info!(
                lang = %config.translate_lang,
                timeout_secs = config.translate_timeout.as_secs(),
                "Dictionary lookups enabled"
            );
            Arc::new(LoggingTranslator::new(Arc::new(dictionary)))
        }
        None => {
            tracing::warn!("No dictionary API key configured. Set TRANSLATE_TOKEN.");
            Arc::new(DisabledTranslator)
        }
    };

    let storage = DatabaseStorage::new(db);
    let engine = ConversationEngine::new(storage.clone(), storage, translator);
    let state = AppState::new(engine);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Vocabulary trainer listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
