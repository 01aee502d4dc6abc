//! Conversation state types

use crate::db::WordPair;
use crate::quiz::Round;
use serde::{Deserialize, Serialize};

/// Conversation state of one (user, chat) pair.
///
/// Each variant carries exactly the scratch data its flow needs, so data
/// from an abandoned flow is dropped on the next transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConvState {
    /// Main menu, every flow returns here
    #[default]
    Default,

    /// Greeted an unregistered user, waiting for a display name
    AwaitingName,

    /// Waiting for the foreign word of a new pair
    AwaitingTargetWord,

    /// Waiting for the translation of `target_word`
    AwaitingTranslation { target_word: String },

    /// Waiting for the word (either side) to remove
    AwaitingWordToDelete,

    /// Training session between rounds
    Training {
        /// Words not yet quizzed in this session; `None` until first fetched
        #[serde(default)]
        pool: Option<Vec<WordPair>>,
    },

    /// A round is on screen, waiting for the answer
    TrainingCheck {
        round: Round,
        /// Words not yet quizzed in this session
        pool: Vec<WordPair>,
    },
}

impl ConvState {
    /// Short tag for logging
    pub fn name(&self) -> &'static str {
        match self {
            ConvState::Default => "default",
            ConvState::AwaitingName => "awaiting_name",
            ConvState::AwaitingTargetWord => "awaiting_target_word",
            ConvState::AwaitingTranslation { .. } => "awaiting_translation",
            ConvState::AwaitingWordToDelete => "awaiting_word_to_delete",
            ConvState::Training { .. } => "training",
            ConvState::TrainingCheck { .. } => "training_check",
        }
    }

    /// Fresh training session with no cached pool
    pub fn training() -> Self {
        ConvState::Training { pool: None }
    }
}
