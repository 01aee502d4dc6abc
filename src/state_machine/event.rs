//! Events that can occur in a conversation

use crate::db::WordPair;
use crate::quiz::Round;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    UserMessage { text: String },

    // Outcomes of effects, fed back by the dispatcher
    RegistrationChecked { registered: bool },
    TranslationResolved { translation: Option<String> },
    WordStored { pair: WordPair },
    /// The acting user is not registered (stale conversation state)
    UnknownUser,
    WordDeleted { removed: Option<WordPair> },
    RoundDrawn { round: Round, remaining: Vec<WordPair> },
    PoolExhausted,
    DictionaryLoaded { words: Vec<WordPair> },
}

impl Event {
    pub fn user_message(text: impl Into<String>) -> Self {
        Event::UserMessage { text: text.into() }
    }
}
