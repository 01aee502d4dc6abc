//! Conversation dispatcher

use super::traits::{StateStore, VocabularyRepository};
use super::{IncomingMessage, OutgoingReply};

use crate::db::ConversationKey;
use crate::quiz::{draw_round, Draw};
use crate::state_machine::{transition, ConvState, Effect, Event, TransitionError};
use crate::texts::CMD_START;
use crate::translate::Translator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Errors that abort handling of a single message
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Generic dispatcher that can work with any repository, state store and translator
pub struct ConversationEngine<R, S, T>
where
    R: VocabularyRepository,
    S: StateStore,
    T: Translator,
{
    repository: R,
    states: S,
    translator: T,
    /// Shuffles quiz pools
    rng: Mutex<StdRng>,
}

impl<R, S, T> ConversationEngine<R, S, T>
where
    R: VocabularyRepository,
    S: StateStore,
    T: Translator,
{
    pub fn new(repository: R, states: S, translator: T) -> Self {
        Self {
            repository,
            states,
            translator,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Make quiz shuffles reproducible
    #[allow(dead_code)] // Used in tests
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Handle one message and return the replies for it.
    ///
    /// The new state is persisted only if every effect succeeded; on error the
    /// stored state is left as it was.
    pub async fn handle_message(
        &self,
        message: IncomingMessage,
    ) -> Result<Vec<OutgoingReply>, EngineError> {
        let key = ConversationKey::new(message.user_id, message.chat_id);

        let stored = self
            .states
            .get_state(key)
            .await
            .map_err(EngineError::Storage)?;

        let (mut state, first_event) = match stored {
            Some(state) => (state, Event::user_message(message.text)),
            None => {
                tracing::info!(user_id = key.user_id, chat_id = key.chat_id, "First contact");
                (ConvState::Default, Event::user_message(CMD_START))
            }
        };

        let mut replies = Vec::new();

        // Effects may produce follow-up events; process them in a loop
        let mut events_to_process = vec![first_event];

        while let Some(current_event) = events_to_process.pop() {
            let result = transition(&state, current_event).map_err(|e| {
                tracing::error!(
                    user_id = key.user_id,
                    state = state.name(),
                    error = %e,
                    "Rejected event"
                );
                e
            })?;

            if result.new_state != state {
                tracing::debug!(
                    user_id = key.user_id,
                    chat_id = key.chat_id,
                    from = state.name(),
                    to = result.new_state.name(),
                    "State transition"
                );
            }
            state = result.new_state;

            for effect in result.effects {
                if let Some(generated_event) = self.execute_effect(key, effect, &mut replies).await? {
                    events_to_process.push(generated_event);
                }
            }
        }

        self.states
            .update_state(key, &state)
            .await
            .map_err(EngineError::Storage)?;

        Ok(replies)
    }

    async fn execute_effect(
        &self,
        key: ConversationKey,
        effect: Effect,
        replies: &mut Vec<OutgoingReply>,
    ) -> Result<Option<Event>, EngineError> {
        let user_id = key.user_id;

        match effect {
            Effect::Reply { text, keyboard } => {
                replies.push(OutgoingReply {
                    chat_id: key.chat_id,
                    text,
                    keyboard,
                });
                Ok(None)
            }

            Effect::CheckRegistration => {
                let user = self
                    .repository
                    .find_user(user_id)
                    .await
                    .map_err(EngineError::Storage)?;
                Ok(Some(Event::RegistrationChecked {
                    registered: user.is_some(),
                }))
            }

            Effect::RegisterUser { name } => {
                self.repository
                    .register_user(user_id, &name)
                    .await
                    .map_err(EngineError::Storage)?;
                tracing::info!(user_id, name = %name, "User registered");
                Ok(None)
            }

            Effect::LookupTranslation { word } => {
                let translation = self.translator.lookup(&word).await;
                Ok(Some(Event::TranslationResolved { translation }))
            }

            Effect::StoreWord {
                target,
                translation,
            } => {
                let stored = self
                    .repository
                    .add_word(user_id, &target, &translation)
                    .await
                    .map_err(EngineError::Storage)?;
                Ok(Some(match stored {
                    Some(pair) => {
                        tracing::info!(user_id, word = %pair, "Word added");
                        Event::WordStored { pair }
                    }
                    None => {
                        tracing::warn!(user_id, "Word not stored, user is not registered");
                        Event::UnknownUser
                    }
                }))
            }

            Effect::DeleteWord { text } => {
                let removed = self
                    .repository
                    .delete_word(user_id, &text)
                    .await
                    .map_err(EngineError::Storage)?;
                if let Some(pair) = &removed {
                    tracing::info!(user_id, word = %pair, "Word deleted");
                }
                Ok(Some(Event::WordDeleted { removed }))
            }

            Effect::DrawRound { pool } => {
                let pool = match pool {
                    Some(pool) => pool,
                    None => self
                        .repository
                        .list_words(user_id)
                        .await
                        .map_err(EngineError::Storage)?,
                };

                let draw = {
                    let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                    draw_round(pool, &mut *rng)
                };

                Ok(Some(match draw {
                    Draw::Round { round, remaining } => Event::RoundDrawn { round, remaining },
                    Draw::Exhausted => {
                        tracing::debug!(user_id, "Training pool exhausted");
                        Event::PoolExhausted
                    }
                }))
            }

            Effect::LoadDictionary => {
                let words = self
                    .repository
                    .list_words(user_id)
                    .await
                    .map_err(EngineError::Storage)?;
                Ok(Some(Event::DictionaryLoaded { words }))
            }
        }
    }
}
