//! State machine trait for dialogue state enums.
//!
//! Gives state enums a single place to declare their legal transitions and
//! a checked `transition_to` that every state change goes through.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors list their legal moves; `transition_to` rejects anything
/// else, so a transition table that forgot an edge surfaces as an error
/// instead of a silently wrong state.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for DialogueState {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         self.valid_transitions().contains(target)
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Init => vec![OptionSelect],
///             // ...
///         }
///     }
/// }
///
/// let next = DialogueState::Init.transition_to(DialogueState::OptionSelect)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
