//! Reply templates, button labels and keyboard layouts
//!
//! The conversation is held in Russian; the words being learned are English.

use crate::db::WordPair;

// ============================================================================
// Commands and buttons
// ============================================================================

pub const CMD_START: &str = "/start";
pub const CMD_HELP: &str = "/help";

pub const BTN_ADD: &str = "Добавить слово";
pub const BTN_DELETE: &str = "Удалить слово";
pub const BTN_TRAIN: &str = "Тренироваться";
pub const BTN_HELP: &str = "Справка ℹ️";
pub const BTN_DICTIONARY: &str = "Мой словарь";
pub const BTN_DECLINE_NAME: &str = "Не хочу представляться";
pub const BTN_AUTO_TRANSLATE: &str = "Переведи слово сам";
pub const BTN_YES: &str = "Да ✅";
pub const BTN_NO: &str = "Нет ❌";
pub const BTN_STOP: &str = "Остановиться";

/// Display name stored for users who decline to introduce themselves
pub const PLACEHOLDER_NAME: &str = "Аноним";

// ============================================================================
// Messages
// ============================================================================

const ABILITIES: &str = "Что я умею:\n\
1. Запоминать новые слова, которые вы хотите выучить.\n\
2. Удалять слова, которые вы уже знаете.\n\
3. Тренировать вас на добавленных словах и на общем наборе.";

pub fn welcome() -> String {
    format!(
        "👋 Привет! Я помогаю учить английские слова.\n\n{ABILITIES}\n\n\
         Как вас называть? Напишите своё имя."
    )
}

pub fn welcome_back() -> String {
    format!("👋 Рад снова вас видеть!\n\n{ABILITIES}\n\nЧем займёмся?")
}

pub const GREET_ANONYMOUS: &str = "Понимаю, осторожность в сети не помешает 🕵️ Начнём учить слова?";

pub fn greet_user(name: &str) -> String {
    format!("Приятно познакомиться, {name}! Начнём учить слова? 🎉")
}

pub const ASK_TARGET_WORD: &str = "Введите новое слово на английском 🇬🇧";
pub const INVALID_TARGET_WORD: &str =
    "Это слово не подходит 😔 Используйте только латинские буквы, дефис и пробел. Попробуйте ещё раз.";

pub const ASK_TRANSLATION: &str = "Теперь введите перевод на русский 🇷🇺";
pub const INVALID_TRANSLATION: &str =
    "Это не похоже на перевод 😔 Используйте только кириллицу, дефис и пробел. Попробуйте ещё раз.";
pub const TRANSLATION_FAILED: &str =
    "Не получилось перевести слово 😔 Пожалуйста, введите перевод вручную.";

pub fn word_added(pair: &WordPair) -> String {
    format!("Отлично! Пара {pair} добавлена. Что дальше?")
}

pub const UNKNOWN_USER: &str =
    "Похоже, мы ещё не знакомы! Напишите /start, и я вас запомню.";

pub const ASK_WORD_TO_DELETE: &str =
    "Какое слово вы уже хорошо знаете? Напишите его по-английски или по-русски.";
pub const WORD_DELETED: &str = "Слово удалено. Что дальше?";
pub const NOTHING_TO_DELETE: &str = "Такого слова нет среди добавленных вами.";

pub const TRAINING_INTRO: &str = "Режим тренировки 🎯 Я называю слово, вы выбираете перевод. Готовы?";
pub const TRAINING_STOPPED: &str = "Хорошо! Скажите, когда захотите потренироваться снова 💪";
pub const CORRECT_ANSWER: &str = "Верно ✅";
pub const INCORRECT_ANSWER: &str = "Неверно ❌ Попробуйте ещё раз.";
pub const NO_WORDS_LEFT: &str = "Слова закончились, тренировка окончена!";

pub fn round_prompt(target_word: &str) -> String {
    format!("Ваше слово: {target_word}. Выберите перевод!")
}

pub const DICTIONARY_EMPTY: &str = "В словаре пока нет слов.";

pub fn dictionary(words: &[WordPair]) -> String {
    let lines: Vec<String> = words.iter().map(ToString::to_string).collect();
    format!("Слова, которые вы изучаете:\n{}", lines.join("\n"))
}

pub const UNKNOWN_COMMAND: &str = "Не понял вас. Выберите действие в меню.";

// ============================================================================
// Keyboards
// ============================================================================

/// Reply keyboard attached to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Leave whatever keyboard the client shows
    Keep,
    /// Hide the keyboard
    Remove,
    /// Main menu
    Menu,
    DeclineName,
    AutoTranslate,
    /// Training confirmation
    Confirm,
    /// Quiz answers, one per row, followed by the stop button
    Answers(Vec<String>),
}

impl Keyboard {
    /// Button rows to render, `None` for `Keep` and `Remove`
    pub fn rows(&self) -> Option<Vec<Vec<String>>> {
        let rows: Vec<Vec<&str>> = match self {
            Keyboard::Keep | Keyboard::Remove => return None,
            Keyboard::Menu => vec![
                vec![BTN_ADD, BTN_DELETE],
                vec![BTN_TRAIN],
                vec![BTN_HELP, BTN_DICTIONARY],
            ],
            Keyboard::DeclineName => vec![vec![BTN_DECLINE_NAME]],
            Keyboard::AutoTranslate => vec![vec![BTN_AUTO_TRANSLATE]],
            Keyboard::Confirm => vec![vec![BTN_YES, BTN_NO]],
            Keyboard::Answers(options) => {
                let mut rows: Vec<Vec<String>> =
                    options.iter().map(|o| vec![o.clone()]).collect();
                rows.push(vec![BTN_STOP.to_string()]);
                return Some(rows);
            }
        };

        Some(
            rows.into_iter()
                .map(|row| row.into_iter().map(String::from).collect())
                .collect(),
        )
    }
}
