//! Pure state transition function
//!
//! Given the same state and event, `transition` always produces the same new
//! state and effects. All I/O (storage, dictionary lookups, shuffling) is
//! requested through effects and comes back as events.

use super::{ConvState, Effect, Event, Intent};
use crate::texts::{self, Keyboard, PLACEHOLDER_NAME};
use crate::validators::{is_valid_target, is_valid_translation};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Shorthand for attaching a reply
    fn reply(self, text: impl Into<String>, keyboard: Keyboard) -> Self {
        self.with_effect(Effect::reply(text, keyboard))
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
pub fn transition(state: &ConvState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Registration (any state)
        // ============================================================

        // `/start` and `/help` work everywhere and abandon the current flow
        (_, Event::UserMessage { text }) if Intent::parse(&text) == Some(Intent::Start) => {
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::CheckRegistration))
        }

        (_, Event::RegistrationChecked { registered: true }) => {
            Ok(TransitionResult::new(ConvState::Default).reply(texts::welcome_back(), Keyboard::Menu))
        }

        (_, Event::RegistrationChecked { registered: false }) => Ok(TransitionResult::new(
            ConvState::AwaitingName,
        )
        .reply(texts::welcome(), Keyboard::DeclineName)),

        (ConvState::AwaitingName, Event::UserMessage { text }) => {
            let (name, greeting) = if Intent::parse(&text) == Some(Intent::DeclineName) {
                (PLACEHOLDER_NAME.to_string(), texts::GREET_ANONYMOUS.to_string())
            } else {
                let greeting = texts::greet_user(&text);
                (text, greeting)
            };
            Ok(TransitionResult::new(ConvState::Default)
                .with_effect(Effect::RegisterUser { name })
                .reply(greeting, Keyboard::Menu))
        }

        // ============================================================
        // Main menu
        // ============================================================
        (ConvState::Default, Event::UserMessage { text }) => Ok(match Intent::parse(&text) {
            Some(Intent::Add) => TransitionResult::new(ConvState::AwaitingTargetWord)
                .reply(texts::ASK_TARGET_WORD, Keyboard::Remove),
            Some(Intent::Delete) => TransitionResult::new(ConvState::AwaitingWordToDelete)
                .reply(texts::ASK_WORD_TO_DELETE, Keyboard::Remove),
            Some(Intent::Train) => TransitionResult::new(ConvState::training())
                .reply(texts::TRAINING_INTRO, Keyboard::Confirm),
            Some(Intent::Help) => {
                TransitionResult::new(ConvState::Default).with_effect(Effect::CheckRegistration)
            }
            Some(Intent::MyDictionary) => {
                TransitionResult::new(ConvState::Default).with_effect(Effect::LoadDictionary)
            }
            _ => TransitionResult::new(ConvState::Default)
                .reply(texts::UNKNOWN_COMMAND, Keyboard::Menu),
        }),

        (ConvState::Default, Event::DictionaryLoaded { words }) => {
            let text = if words.is_empty() {
                texts::DICTIONARY_EMPTY.to_string()
            } else {
                texts::dictionary(&words)
            };
            Ok(TransitionResult::new(ConvState::Default).reply(text, Keyboard::Menu))
        }

        // ============================================================
        // Adding a word
        // ============================================================
        (ConvState::AwaitingTargetWord, Event::UserMessage { text }) => {
            let target_word = text.to_lowercase();
            if !is_valid_target(&target_word) {
                return Ok(TransitionResult::new(state.clone())
                    .reply(texts::INVALID_TARGET_WORD, Keyboard::Keep));
            }
            Ok(TransitionResult::new(ConvState::AwaitingTranslation { target_word })
                .reply(texts::ASK_TRANSLATION, Keyboard::AutoTranslate))
        }

        (ConvState::AwaitingTranslation { target_word }, Event::UserMessage { text }) => {
            if Intent::parse(&text) == Some(Intent::AutoTranslate) {
                return Ok(TransitionResult::new(state.clone()).with_effect(
                    Effect::LookupTranslation {
                        word: target_word.clone(),
                    },
                ));
            }
            Ok(accept_translation(state, target_word, &text))
        }

        (ConvState::AwaitingTranslation { target_word }, Event::TranslationResolved { translation }) => {
            Ok(match translation {
                Some(translation) => accept_translation(state, target_word, &translation),
                None => TransitionResult::new(state.clone())
                    .reply(texts::TRANSLATION_FAILED, Keyboard::Keep),
            })
        }

        (ConvState::AwaitingTranslation { .. }, Event::WordStored { pair }) => {
            Ok(TransitionResult::new(ConvState::Default).reply(texts::word_added(&pair), Keyboard::Menu))
        }

        // Stale state for a user we do not know: reset to the menu
        (ConvState::AwaitingTranslation { .. }, Event::UnknownUser) => {
            Ok(TransitionResult::new(ConvState::Default).reply(texts::UNKNOWN_USER, Keyboard::Menu))
        }

        // ============================================================
        // Deleting a word
        // ============================================================
        (ConvState::AwaitingWordToDelete, Event::UserMessage { text }) => {
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::DeleteWord {
                text: text.to_lowercase(),
            }))
        }

        (ConvState::AwaitingWordToDelete, Event::WordDeleted { removed }) => {
            let text = if removed.is_some() {
                texts::WORD_DELETED
            } else {
                texts::NOTHING_TO_DELETE
            };
            Ok(TransitionResult::new(ConvState::Default).reply(text, Keyboard::Menu))
        }

        // ============================================================
        // Training
        // ============================================================
        (ConvState::Training { .. } | ConvState::TrainingCheck { .. }, Event::UserMessage { text })
            if is_stop(&text, state) =>
        {
            Ok(TransitionResult::new(ConvState::Default).reply(texts::TRAINING_STOPPED, Keyboard::Menu))
        }

        (ConvState::Training { pool }, Event::UserMessage { .. }) => {
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::DrawRound { pool: pool.clone() }))
        }

        (ConvState::Training { .. }, Event::RoundDrawn { round, remaining }) => {
            let prompt = texts::round_prompt(&round.target_word);
            let keyboard = Keyboard::Answers(round.options.clone());
            Ok(TransitionResult::new(ConvState::TrainingCheck {
                round,
                pool: remaining,
            })
            .reply(prompt, keyboard))
        }

        (ConvState::Training { .. }, Event::PoolExhausted) => {
            Ok(TransitionResult::new(ConvState::Default).reply(texts::NO_WORDS_LEFT, Keyboard::Menu))
        }

        // Correct answer chains straight into the next round
        (ConvState::TrainingCheck { round, pool }, Event::UserMessage { text }) if round.is_correct(&text) => {
            Ok(TransitionResult::new(ConvState::Training {
                pool: Some(pool.clone()),
            })
            .reply(texts::CORRECT_ANSWER, Keyboard::Keep)
            .with_effect(Effect::DrawRound {
                pool: Some(pool.clone()),
            }))
        }

        // Wrong answer keeps the round on screen for another try
        (ConvState::TrainingCheck { .. }, Event::UserMessage { .. }) => {
            Ok(TransitionResult::new(state.clone()).reply(texts::INCORRECT_ANSWER, Keyboard::Keep))
        }

        // ============================================================
        // Invalid Transitions
        // ============================================================
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {} with event {:?}",
            state.name(),
            event
        ))),
    }
}

/// Lower-case and validate a translation, then ask for the pair to be stored
fn accept_translation(state: &ConvState, target_word: &str, text: &str) -> TransitionResult {
    let translation = text.to_lowercase();
    if !is_valid_translation(&translation) {
        return TransitionResult::new(state.clone()).reply(texts::INVALID_TRANSLATION, Keyboard::Keep);
    }
    TransitionResult::new(state.clone()).with_effect(Effect::StoreWord {
        target: target_word.to_string(),
        translation,
    })
}

/// Stop button ends training in both training states; "No" only answers the
/// confirmation question shown on entering training.
fn is_stop(text: &str, state: &ConvState) -> bool {
    match Intent::parse(text) {
        Some(Intent::Stop) => true,
        Some(Intent::No) => matches!(state, ConvState::Training { .. }),
        _ => false,
    }
}
