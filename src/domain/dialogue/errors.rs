//! Dialogue errors.
//!
//! Bad user input is never an error here; it is answered with a re-prompt.
//! These variants mean the session record or the transition table is broken.

use thiserror::Error;

use super::state::DialogueState;
use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DialogueError {
    #[error("Session in state '{state}' is missing field '{field}'")]
    MissingField {
        state: DialogueState,
        field: &'static str,
    },

    #[error("Session in state '{state}' holds both 'weight' and 'orm'")]
    ConflictingFields { state: DialogueState },

    #[error("Stored field '{field}' is invalid: {reason}")]
    InvalidStoredValue { field: &'static str, reason: String },

    #[error("Illegal transition: {0}")]
    IllegalTransition(#[from] ValidationError),
}
