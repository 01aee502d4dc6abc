//! Recognition of commands and button presses

use crate::texts::{
    BTN_ADD, BTN_AUTO_TRANSLATE, BTN_DECLINE_NAME, BTN_DELETE, BTN_DICTIONARY, BTN_HELP, BTN_NO,
    BTN_STOP, BTN_TRAIN, BTN_YES, CMD_HELP, CMD_START,
};

/// A command the user expressed through a slash command or a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// `/start` or `/help`: registration check and greeting
    Start,
    /// Help button in the main menu
    Help,
    Add,
    Delete,
    Train,
    MyDictionary,
    DeclineName,
    AutoTranslate,
    Yes,
    No,
    Stop,
}

impl Intent {
    /// Recognize `text`; free-form input yields `None`.
    ///
    /// Slash commands may carry a payload (`/start ref42`). Buttons must match
    /// exactly, so typed words are never mistaken for commands.
    pub fn parse(text: &str) -> Option<Self> {
        let command = text.split_whitespace().next().unwrap_or_default();
        if command == CMD_START || command == CMD_HELP {
            return Some(Intent::Start);
        }

        match text {
            BTN_HELP => Some(Intent::Help),
            BTN_ADD => Some(Intent::Add),
            BTN_DELETE => Some(Intent::Delete),
            BTN_TRAIN => Some(Intent::Train),
            BTN_DICTIONARY => Some(Intent::MyDictionary),
            BTN_DECLINE_NAME => Some(Intent::DeclineName),
            BTN_AUTO_TRANSLATE => Some(Intent::AutoTranslate),
            BTN_YES => Some(Intent::Yes),
            BTN_NO => Some(Intent::No),
            BTN_STOP => Some(Intent::Stop),
            _ => None,
        }
    }
}
