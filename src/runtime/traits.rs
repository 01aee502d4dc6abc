//! Trait abstractions for runtime I/O
//!
//! These traits let the dispatcher run against SQLite in production and
//! against in-memory doubles in tests.

use crate::db::{ConversationKey, User, WordPair};
use crate::state_machine::ConvState;
use async_trait::async_trait;
use std::sync::Arc;

/// Users and their word pairs
#[async_trait]
pub trait VocabularyRepository: Send + Sync {
    /// Find a registered user by platform id
    async fn find_user(&self, external_id: i64) -> Result<Option<User>, String>;

    /// Register a user; registering an existing id is a no-op
    async fn register_user(&self, external_id: i64, name: &str) -> Result<(), String>;

    /// The user's own pairs plus the shared pool, unordered
    async fn list_words(&self, external_id: i64) -> Result<Vec<WordPair>, String>;

    /// Store a pair; `None` if the user is not registered
    async fn add_word(
        &self,
        external_id: i64,
        target: &str,
        translation: &str,
    ) -> Result<Option<WordPair>, String>;

    /// Remove one own pair whose target or translation equals `text`
    async fn delete_word(&self, external_id: i64, text: &str) -> Result<Option<WordPair>, String>;
}

/// Per-conversation state storage
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Stored state, `None` on first contact
    async fn get_state(&self, key: ConversationKey) -> Result<Option<ConvState>, String>;

    /// Overwrite the stored state
    async fn update_state(&self, key: ConversationKey, state: &ConvState) -> Result<(), String>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: VocabularyRepository + ?Sized> VocabularyRepository for Arc<T> {
    async fn find_user(&self, external_id: i64) -> Result<Option<User>, String> {
        (**self).find_user(external_id).await
    }

    async fn register_user(&self, external_id: i64, name: &str) -> Result<(), String> {
        (**self).register_user(external_id, name).await
    }

    async fn list_words(&self, external_id: i64) -> Result<Vec<WordPair>, String> {
        (**self).list_words(external_id).await
    }

    async fn add_word(
        &self,
        external_id: i64,
        target: &str,
        translation: &str,
    ) -> Result<Option<WordPair>, String> {
        (**self).add_word(external_id, target, translation).await
    }

    async fn delete_word(&self, external_id: i64, text: &str) -> Result<Option<WordPair>, String> {
        (**self).delete_word(external_id, text).await
    }
}

#[async_trait]
impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    async fn get_state(&self, key: ConversationKey) -> Result<Option<ConvState>, String> {
        (**self).get_state(key).await
    }

    async fn update_state(&self, key: ConversationKey, state: &ConvState) -> Result<(), String> {
        (**self).update_state(key, state).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

use crate::db::Database;

/// Adapter to use Database as repository and state store
#[derive(Clone)]
pub struct DatabaseStorage {
    db: Database,
}

impl DatabaseStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VocabularyRepository for DatabaseStorage {
    async fn find_user(&self, external_id: i64) -> Result<Option<User>, String> {
        self.db.get_user(external_id).map_err(|e| e.to_string())
    }

    async fn register_user(&self, external_id: i64, name: &str) -> Result<(), String> {
        let created = self
            .db
            .create_user(external_id, Some(name))
            .map_err(|e| e.to_string())?;
        if !created {
            tracing::debug!(user_id = external_id, "User already registered");
        }
        Ok(())
    }

    async fn list_words(&self, external_id: i64) -> Result<Vec<WordPair>, String> {
        self.db.list_words(external_id).map_err(|e| e.to_string())
    }

    async fn add_word(
        &self,
        external_id: i64,
        target: &str,
        translation: &str,
    ) -> Result<Option<WordPair>, String> {
        self.db
            .add_word(external_id, target, translation)
            .map_err(|e| e.to_string())
    }

    async fn delete_word(&self, external_id: i64, text: &str) -> Result<Option<WordPair>, String> {
        self.db
            .delete_word(external_id, text)
            .map_err(|e| e.to_string())
    }
}

#[async_trait]
impl StateStore for DatabaseStorage {
    async fn get_state(&self, key: ConversationKey) -> Result<Option<ConvState>, String> {
        self.db
            .get_conversation_state(key)
            .map_err(|e| e.to_string())
    }

    async fn update_state(&self, key: ConversationKey, state: &ConvState) -> Result<(), String> {
        self.db
            .update_conversation_state(key, state)
            .map_err(|e| e.to_string())
    }
}
