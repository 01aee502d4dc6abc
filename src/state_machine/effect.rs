//! Effects produced by state transitions

use crate::db::WordPair;
use crate::texts::Keyboard;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a message to the chat
    Reply { text: String, keyboard: Keyboard },

    /// Look up whether the user is registered
    CheckRegistration,

    /// Register the user under a display name
    RegisterUser { name: String },

    /// Ask the external dictionary for a translation
    LookupTranslation { word: String },

    /// Persist a new pair for the user
    StoreWord { target: String, translation: String },

    /// Remove one of the user's own pairs matching `text`
    DeleteWord { text: String },

    /// Run the round-start procedure; a `None` pool is fetched fresh
    DrawRound { pool: Option<Vec<WordPair>> },

    /// Fetch the user's full word list for display
    LoadDictionary,
}

impl Effect {
    pub fn reply(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Effect::Reply {
            text: text.into(),
            keyboard,
        }
    }
}
