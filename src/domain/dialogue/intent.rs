//! Classification of raw message text before any state handling.

use crate::domain::vocabulary;

/// What a message means independent of the conversation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent<'a> {
    /// Informational side channel; the session is not touched.
    Help,
    /// Discard the session and start over.
    Restart,
    /// An answer to whatever the current state is asking.
    Answer(&'a str),
}

impl<'a> Intent<'a> {
    /// Classifies a message. Surrounding whitespace is ignored.
    pub fn parse(text: &'a str) -> Self {
        let text = text.trim();
        if text == vocabulary::HELP_COMMAND {
            Intent::Help
        } else if text == vocabulary::START_COMMAND || vocabulary::is_restart_phrase(text) {
            Intent::Restart
        } else {
            Intent::Answer(text)
        }
    }
}
