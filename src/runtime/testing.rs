//! Mock implementations for testing
//!
//! These mocks enable dispatcher testing without real I/O.

use super::traits::*;
use super::{ConversationEngine, IncomingMessage, OutgoingReply};
use crate::db::{ConversationKey, Database};
use crate::state_machine::ConvState;
use crate::translate::Translator;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Translator
// ============================================================================

/// Mock translator that returns queued results
#[derive(Default)]
pub struct MockTranslator {
    responses: Mutex<VecDeque<Option<String>>>,
    /// Record of all words looked up
    pub lookups: Mutex<Vec<String>>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next lookup
    pub fn queue(&self, translation: Option<&str>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(translation.map(String::from));
    }

    pub fn recorded_lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn lookup(&self, word: &str) -> Option<String> {
        self.lookups.lock().unwrap().push(word.to_string());
        self.responses.lock().unwrap().pop_front().flatten()
    }
}

// ============================================================================
// In-Memory State Store
// ============================================================================

/// State store backed by a map, with optional write failures
#[derive(Default)]
pub struct InMemoryStateStore {
    states: Mutex<HashMap<ConversationKey, ConvState>>,
    fail_writes: Mutex<bool>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self, key: ConversationKey) -> Option<ConvState> {
        self.states.lock().unwrap().get(&key).cloned()
    }

    pub fn set(&self, key: ConversationKey, state: ConvState) {
        self.states.lock().unwrap().insert(key, state);
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get_state(&self, key: ConversationKey) -> Result<Option<ConvState>, String> {
        Ok(self.current(key))
    }

    async fn update_state(&self, key: ConversationKey, state: &ConvState) -> Result<(), String> {
        if *self.fail_writes.lock().unwrap() {
            return Err("disk full".to_string());
        }
        self.set(key, state.clone());
        Ok(())
    }
}

// ============================================================================
// Harness
// ============================================================================

pub type TestEngine =
    ConversationEngine<DatabaseStorage, Arc<InMemoryStateStore>, Arc<MockTranslator>>;

/// Engine over an in-memory database seeded with the shared pool
pub struct Harness {
    pub engine: TestEngine,
    pub db: Database,
    pub states: Arc<InMemoryStateStore>,
    pub translator: Arc<MockTranslator>,
}

impl Harness {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let db = Database::open_in_memory().unwrap();
        db.ensure_shared_pool().unwrap();
        let states = Arc::new(InMemoryStateStore::new());
        let translator = Arc::new(MockTranslator::new());
        let engine = ConversationEngine::new(
            DatabaseStorage::new(db.clone()),
            states.clone(),
            translator.clone(),
        )
        .with_seed(11);
        Self {
            engine,
            db,
            states,
            translator,
        }
    }

    /// Send `text` as user 1 in chat 100
    pub async fn send(&self, text: &str) -> Vec<OutgoingReply> {
        self.engine
            .handle_message(IncomingMessage::new(1, 100, text))
            .await
            .unwrap()
    }

    pub fn state(&self) -> Option<ConvState> {
        self.states.current(ConversationKey::new(1, 100))
    }

    pub fn set_state(&self, state: ConvState) {
        self.states.set(ConversationKey::new(1, 100), state);
    }

    /// Register user 1 and leave them on the main menu
    pub async fn registered(self) -> Self {
        self.send("/start").await;
        self.send("Alice").await;
        assert_eq!(self.state(), Some(ConvState::Default));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::WordPair;
    use crate::runtime::EngineError;
    use crate::texts::{
        self, Keyboard, BTN_ADD, BTN_AUTO_TRANSLATE, BTN_DECLINE_NAME, BTN_DELETE, BTN_DICTIONARY,
        BTN_STOP, BTN_TRAIN, BTN_YES, PLACEHOLDER_NAME,
    };
    use std::collections::HashSet;

    fn texts_of(replies: &[OutgoingReply]) -> Vec<&str> {
        replies.iter().map(|r| r.text.as_str()).collect()
    }

    /// Current round, panics outside `training_check`
    fn current_round(h: &Harness) -> crate::quiz::Round {
        match h.state() {
            Some(ConvState::TrainingCheck { round, .. }) => round,
            other => panic!("expected training_check, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mock_translator_queue() {
        let mock = MockTranslator::new();
        mock.queue(Some("кошка"));
        assert_eq!(mock.lookup("cat").await, Some("кошка".to_string()));
        assert_eq!(mock.lookup("dog").await, None);
        assert_eq!(mock.recorded_lookups(), vec!["cat", "dog"]);
    }

    #[tokio::test]
    async fn test_new_user_registration_with_declined_name() {
        let h = Harness::new();

        let replies = h.send("/start").await;
        assert_eq!(h.state(), Some(ConvState::AwaitingName));
        assert_eq!(replies[0].keyboard, Keyboard::DeclineName);

        let replies = h.send(BTN_DECLINE_NAME).await;
        assert_eq!(h.state(), Some(ConvState::Default));
        assert_eq!(texts_of(&replies), vec![texts::GREET_ANONYMOUS]);

        let user = h.db.get_user(1).unwrap().unwrap();
        assert_eq!(user.name.as_deref(), Some(PLACEHOLDER_NAME));
    }

    #[tokio::test]
    async fn test_first_contact_without_start_greets() {
        let h = Harness::new();
        let replies = h.send("hello?").await;
        assert_eq!(h.state(), Some(ConvState::AwaitingName));
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].chat_id, 100);
    }

    #[tokio::test]
    async fn test_returning_user_enters_default() {
        let h = Harness::new().registered().await;
        h.set_state(ConvState::AwaitingTargetWord);

        let replies = h.send("/start").await;
        assert_eq!(h.state(), Some(ConvState::Default));
        assert_eq!(replies[0].keyboard, Keyboard::Menu);
        assert_eq!(h.db.get_user(1).unwrap().unwrap().name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_add_word_scenario() {
        let h = Harness::new().registered().await;

        h.send(BTN_ADD).await;
        assert_eq!(h.state(), Some(ConvState::AwaitingTargetWord));

        let replies = h.send("cat!").await;
        assert_eq!(texts_of(&replies), vec![texts::INVALID_TARGET_WORD]);
        assert_eq!(h.state(), Some(ConvState::AwaitingTargetWord));
        assert_eq!(h.db.list_words(1).unwrap().len(), 10);

        h.send("cat").await;
        assert_eq!(
            h.state(),
            Some(ConvState::AwaitingTranslation { target_word: "cat".to_string() })
        );

        let replies = h.send("кот").await;
        assert_eq!(h.state(), Some(ConvState::Default));
        assert_eq!(replies[0].keyboard, Keyboard::Menu);
        assert!(h.db.list_words(1).unwrap().contains(&WordPair::new("cat", "кот")));
    }

    #[tokio::test]
    async fn test_auto_translate_failure_then_manual() {
        let h = Harness::new().registered().await;
        h.send(BTN_ADD).await;
        h.send("Cat").await;

        h.translator.queue(None);
        let replies = h.send(BTN_AUTO_TRANSLATE).await;
        assert_eq!(texts_of(&replies), vec![texts::TRANSLATION_FAILED]);
        assert_eq!(h.translator.recorded_lookups(), vec!["cat"]);
        assert!(matches!(h.state(), Some(ConvState::AwaitingTranslation { .. })));

        h.translator.queue(Some("Кошка"));
        h.send(BTN_AUTO_TRANSLATE).await;
        assert_eq!(h.state(), Some(ConvState::Default));
        assert!(h.db.list_words(1).unwrap().contains(&WordPair::new("cat", "кошка")));
    }

    #[tokio::test]
    async fn test_unknown_user_mid_flow_resets() {
        let h = Harness::new();
        h.set_state(ConvState::AwaitingTranslation { target_word: "cat".to_string() });

        let replies = h.send("кот").await;
        assert_eq!(texts_of(&replies), vec![texts::UNKNOWN_USER]);
        assert_eq!(h.state(), Some(ConvState::Default));
        assert_eq!(h.db.list_words(1).unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_shared_pool_owner_cannot_add_words() {
        let h = Harness::new();
        let mut replies = Vec::new();
        for text in ["/start", BTN_ADD, "cat", "кот"] {
            replies = h
                .engine
                .handle_message(IncomingMessage::new(0, 1, text))
                .await
                .unwrap();
        }
        assert_eq!(texts_of(&replies), vec![texts::UNKNOWN_USER]);

        h.db.create_user(555, None).unwrap();
        let words = h.db.list_words(555).unwrap();
        assert_eq!(words.len(), 10);
        assert!(!words.contains(&WordPair::new("cat", "кот")));
    }

    #[tokio::test]
    async fn test_delete_word_scenario() {
        let h = Harness::new().registered().await;
        h.db.add_word(1, "cat", "кот").unwrap();

        h.send(BTN_DELETE).await;
        assert_eq!(h.state(), Some(ConvState::AwaitingWordToDelete));
        let replies = h.send("КОТ").await;
        assert_eq!(texts_of(&replies), vec![texts::WORD_DELETED]);
        assert_eq!(h.state(), Some(ConvState::Default));
        assert!(!h.db.list_words(1).unwrap().contains(&WordPair::new("cat", "кот")));

        // Shared pool words cannot be deleted
        h.send(BTN_DELETE).await;
        let replies = h.send("oven").await;
        assert_eq!(texts_of(&replies), vec![texts::NOTHING_TO_DELETE]);
        assert_eq!(h.state(), Some(ConvState::Default));
        assert_eq!(h.db.list_words(1).unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_dictionary_lists_shared_and_own_words() {
        let h = Harness::new().registered().await;
        h.db.add_word(1, "cat", "кот").unwrap();

        let replies = h.send(BTN_DICTIONARY).await;
        assert_eq!(replies.len(), 1);
        assert!(replies[0].text.contains("oven - духовка"));
        assert!(replies[0].text.contains("cat - кот"));
        assert_eq!(h.state(), Some(ConvState::Default));
    }

    #[tokio::test]
    async fn test_training_on_shared_pool_until_exhausted() {
        let h = Harness::new().registered().await;

        h.send(BTN_TRAIN).await;
        assert_eq!(h.state(), Some(ConvState::Training { pool: None }));

        let replies = h.send(BTN_YES).await;
        let round = current_round(&h);
        assert_eq!(round.options.len(), 4);
        assert!(matches!(&replies[0].keyboard, Keyboard::Answers(o) if o.len() == 4));

        let mut prompted = HashSet::from([round.target_word.clone()]);

        // 10 shared words give two rounds of four
        let replies = h.send(&round.answer).await;
        assert_eq!(replies[0].text, texts::CORRECT_ANSWER);
        let second = current_round(&h);
        assert!(prompted.insert(second.target_word.clone()));

        let replies = h.send(&second.answer).await;
        assert_eq!(texts_of(&replies), vec![texts::CORRECT_ANSWER, texts::NO_WORDS_LEFT]);
        assert_eq!(h.state(), Some(ConvState::Default));
    }

    #[tokio::test]
    async fn test_wrong_answer_allows_retry() {
        let h = Harness::new().registered().await;
        h.send(BTN_TRAIN).await;
        h.send(BTN_YES).await;
        let round = current_round(&h);

        let wrong = round
            .options
            .iter()
            .find(|o| **o != round.answer)
            .cloned()
            .unwrap();
        let replies = h.send(&wrong).await;
        assert_eq!(texts_of(&replies), vec![texts::INCORRECT_ANSWER]);
        assert_eq!(current_round(&h), round);

        h.send(&round.answer).await;
        assert_ne!(current_round(&h).target_word, round.target_word);
    }

    #[tokio::test]
    async fn test_stop_during_round() {
        let h = Harness::new().registered().await;
        h.send(BTN_TRAIN).await;
        h.send(BTN_YES).await;

        let replies = h.send(BTN_STOP).await;
        assert_eq!(texts_of(&replies), vec![texts::TRAINING_STOPPED]);
        assert_eq!(h.state(), Some(ConvState::Default));
    }

    #[tokio::test]
    async fn test_new_session_refetches_pool() {
        let h = Harness::new().registered().await;
        h.send(BTN_TRAIN).await;
        h.send(BTN_YES).await;
        h.send(BTN_STOP).await;

        h.send(BTN_TRAIN).await;
        h.send(BTN_YES).await;
        match h.state() {
            Some(ConvState::TrainingCheck { pool, .. }) => assert_eq!(pool.len(), 6),
            other => panic!("expected training_check, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_training_with_own_words_grows_pool() {
        let h = Harness::new().registered().await;
        for (target, translation) in [("cat", "кот"), ("dog", "собака")] {
            h.db.add_word(1, target, translation).unwrap();
        }
        h.send(BTN_TRAIN).await;
        h.send(BTN_YES).await;
        match h.state() {
            Some(ConvState::TrainingCheck { pool, .. }) => assert_eq!(pool.len(), 8),
            other => panic!("expected training_check, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_state_write_failure_keeps_previous_state() {
        let h = Harness::new().registered().await;
        h.states.fail_writes(true);

        let result = h.engine.handle_message(IncomingMessage::new(1, 100, BTN_ADD)).await;
        assert!(matches!(result, Err(EngineError::Storage(_))));

        h.states.fail_writes(false);
        assert_eq!(h.state(), Some(ConvState::Default));
    }

    #[tokio::test]
    async fn test_conversations_are_keyed_by_user_and_chat() {
        let h = Harness::new().registered().await;
        h.send(BTN_ADD).await;

        // Same user in another chat starts from first contact
        h.engine
            .handle_message(IncomingMessage::new(1, 200, "hi"))
            .await
            .unwrap();
        assert_eq!(
            h.states.current(ConversationKey::new(1, 200)),
            Some(ConvState::Default)
        );
        assert_eq!(h.state(), Some(ConvState::AwaitingTargetWord));
    }
}
