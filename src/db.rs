//! Database module for the vocabulary trainer
//!
//! Provides persistence for users, their word pairs and conversation state.

mod schema;

pub use schema::*;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("State serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Database lock poisoned")]
    LockPoisoned,
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    pub(crate) fn conn(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::LockPoisoned)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ==================== User Operations ====================

    /// Find a user by the platform-assigned id
    pub fn get_user(&self, external_id: i64) -> DbResult<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, external_id, name, created_at FROM users WHERE external_id = ?1",
                params![external_id],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        external_id: row.get(1)?,
                        name: row.get(2)?,
                        created_at: parse_datetime(&row.get::<_, String>(3)?),
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Register a user. Returns `false` if the external id was already taken
    /// or is the reserved shared-pool id.
    pub fn create_user(&self, external_id: i64, name: Option<&str>) -> DbResult<bool> {
        if external_id == SHARED_POOL_EXTERNAL_ID {
            return Ok(false);
        }
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT INTO users (external_id, name, created_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(external_id) DO NOTHING",
            params![external_id, name, Utc::now().to_rfc3339()],
        )?;
        Ok(inserted > 0)
    }

    /// Create the reserved shared-pool user and its starter words.
    ///
    /// Does nothing when the reserved user already exists, so restarts keep
    /// whatever the pool holds.
    pub fn ensure_shared_pool(&self) -> DbResult<bool> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE external_id = ?1)",
            params![SHARED_POOL_EXTERNAL_ID],
            |row| row.get(0),
        )?;
        if exists {
            return Ok(false);
        }

        tx.execute(
            "INSERT INTO users (external_id, name, created_at) VALUES (?1, ?2, ?3)",
            params![SHARED_POOL_EXTERNAL_ID, SHARED_POOL_NAME, Utc::now().to_rfc3339()],
        )?;
        let owner_id = tx.last_insert_rowid();

        for (target, translation) in STARTER_WORDS {
            insert_pair(&tx, owner_id, target, translation)?;
        }

        tx.commit()?;
        Ok(true)
    }

    // ==================== Vocabulary Operations ====================

    /// All pairs owned by the user or by the shared pool, in entry order
    pub fn list_words(&self, external_id: i64) -> DbResult<Vec<WordPair>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT w.target, w.translation
             FROM words w
             JOIN vocabulary v ON v.word_id = w.id
             JOIN users u ON u.id = v.user_id
             WHERE u.external_id = ?1 OR u.external_id = ?2
             ORDER BY v.id ASC",
        )?;

        let rows = stmt.query_map(params![external_id, SHARED_POOL_EXTERNAL_ID], |row| {
            Ok(WordPair {
                target: row.get(0)?,
                translation: row.get(1)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    /// Store a new pair for the user.
    ///
    /// Returns `None` when no user with `external_id` is registered. The
    /// shared-pool owner counts as unregistered here, its words are only
    /// written by [`Database::ensure_shared_pool`].
    pub fn add_word(
        &self,
        external_id: i64,
        target: &str,
        translation: &str,
    ) -> DbResult<Option<WordPair>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let user_id: Option<i64> = tx
            .query_row(
                "SELECT id FROM users WHERE external_id = ?1 AND external_id != ?2",
                params![external_id, SHARED_POOL_EXTERNAL_ID],
                |row| row.get(0),
            )
            .optional()?;
        let Some(user_id) = user_id else {
            return Ok(None);
        };

        insert_pair(&tx, user_id, target, translation)?;
        tx.commit()?;

        Ok(Some(WordPair::new(target, translation)))
    }

    /// Delete one of the user's own pairs whose target or translation is `text`.
    ///
    /// When several entries match, the oldest one (lowest vocabulary id) is
    /// removed. Shared-pool entries never match. Returns the removed pair.
    pub fn delete_word(&self, external_id: i64, text: &str) -> DbResult<Option<WordPair>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let found: Option<(i64, i64, WordPair)> = tx
            .query_row(
                "SELECT v.id, w.id, w.target, w.translation
                 FROM vocabulary v
                 JOIN words w ON w.id = v.word_id
                 JOIN users u ON u.id = v.user_id
                 WHERE u.external_id = ?1 AND u.external_id != ?2
                   AND (w.target = ?3 OR w.translation = ?3)
                 ORDER BY v.id ASC
                 LIMIT 1",
                params![external_id, SHARED_POOL_EXTERNAL_ID, text],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        WordPair::new(row.get::<_, String>(2)?, row.get::<_, String>(3)?),
                    ))
                },
            )
            .optional()?;

        let Some((entry_id, word_id, pair)) = found else {
            return Ok(None);
        };

        tx.execute("DELETE FROM vocabulary WHERE id = ?1", params![entry_id])?;
        tx.execute("DELETE FROM words WHERE id = ?1", params![word_id])?;
        tx.commit()?;

        Ok(Some(pair))
    }

    // ==================== Conversation State ====================

    /// Stored state for a conversation, `None` on first contact.
    ///
    /// Rows that no longer deserialize are treated as absent.
    pub fn get_conversation_state(&self, key: ConversationKey) -> DbResult<Option<ConvState>> {
        let conn = self.conn()?;
        let state_json: Option<String> = conn
            .query_row(
                "SELECT state FROM conversations WHERE user_id = ?1 AND chat_id = ?2",
                params![key.user_id, key.chat_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(state_json.and_then(|json| match serde_json::from_str(&json) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(
                    user_id = key.user_id,
                    chat_id = key.chat_id,
                    error = %e,
                    "Discarding unreadable conversation state"
                );
                None
            }
        }))
    }

    /// Overwrite the conversation state
    pub fn update_conversation_state(&self, key: ConversationKey, state: &ConvState) -> DbResult<()> {
        let conn = self.conn()?;
        let state_json = serde_json::to_string(state)?;

        conn.execute(
            "INSERT INTO conversations (user_id, chat_id, state, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id, chat_id) DO UPDATE SET state = ?3, updated_at = ?4",
            params![key.user_id, key.chat_id, state_json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

fn insert_pair(
    conn: &Connection,
    user_id: i64,
    target: &str,
    translation: &str,
) -> DbResult<()> {
    conn.execute(
        "INSERT INTO words (target, translation) VALUES (?1, ?2)",
        params![target, translation],
    )?;
    let word_id = conn.last_insert_rowid();
    conn.execute(
        "INSERT INTO vocabulary (user_id, word_id) VALUES (?1, ?2)",
        params![user_id, word_id],
    )?;
    Ok(())
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}
