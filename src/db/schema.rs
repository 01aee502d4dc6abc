//! Database schema and types

pub use crate::state_machine::state::ConvState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL schema for initialization
pub const SCHEMA: &str = r"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    external_id INTEGER NOT NULL UNIQUE,
    name TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS words (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    target TEXT NOT NULL,
    translation TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS vocabulary (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    word_id INTEGER NOT NULL,

    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (word_id) REFERENCES words(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_vocabulary_user ON vocabulary(user_id);

CREATE TABLE IF NOT EXISTS conversations (
    user_id INTEGER NOT NULL,
    chat_id INTEGER NOT NULL,
    state TEXT NOT NULL,
    updated_at TEXT NOT NULL,

    PRIMARY KEY (user_id, chat_id)
);
";

/// External id of the reserved user owning the shared word pool
pub const SHARED_POOL_EXTERNAL_ID: i64 = 0;

/// Display name of the reserved user
pub const SHARED_POOL_NAME: &str = "everybody";

/// Pairs seeded into the shared pool on first bootstrap
pub const STARTER_WORDS: [(&str, &str); 10] = [
    ("vitamin", "витамин"),
    ("oven", "духовка"),
    ("silk", "шелк"),
    ("jacket", "куртка"),
    ("soda", "газировка"),
    ("shower", "душ"),
    ("sword", "меч"),
    ("vampire", "вампир"),
    ("widow", "вдова"),
    ("stick", "палка"),
];

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Local row id
    pub id: i64,
    /// Identity assigned by the messaging platform
    pub external_id: i64,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A foreign word and its translation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    pub target: String,
    pub translation: String,
}

impl WordPair {
    pub fn new(target: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            translation: translation.into(),
        }
    }
}

impl fmt::Display for WordPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.target, self.translation)
    }
}

/// Identifies one conversation: a user talking in a chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey {
    pub user_id: i64,
    pub chat_id: i64,
}

impl ConversationKey {
    pub fn new(user_id: i64, chat_id: i64) -> Self {
        Self { user_id, chat_id }
    }
}
