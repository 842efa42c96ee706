//! Per-user conversation record.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

use super::errors::DialogueError;
use super::state::{DialogueState, Flow};
use crate::domain::strength::{Category, Weight};

/// Everything the bot remembers about one user between messages.
///
/// Optional fields fill up in flow order and are all cleared when a flow
/// completes. `weight` belongs to the one-rep max flow and `orm` to the
/// rep weight flow; a record never carries both.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserSession {
    pub state: DialogueState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orm: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<Category>,
}

impl UserSession {
    /// A fresh session in `init`.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no flow-scoped field is populated.
    pub fn is_blank(&self) -> bool {
        self.weight.is_none()
            && self.orm.is_none()
            && self.reps.is_none()
            && self.sets.is_none()
            && self.exercise.is_none()
    }

    /// Stores the first answer of a flow in the field that flow owns.
    pub(crate) fn set_load(&mut self, flow: Flow, value: Weight) {
        match flow {
            Flow::OneRepMax => self.weight = Some(value.value()),
            Flow::TargetWeight => self.orm = Some(value.value()),
        }
    }

    /// Reads back the first answer of a flow, checking the record is sound.
    pub(crate) fn load_for(&self, flow: Flow) -> Result<Weight, DialogueError> {
        let (own, other, field) = match flow {
            Flow::OneRepMax => (self.weight, self.orm, "weight"),
            Flow::TargetWeight => (self.orm, self.weight, "orm"),
        };
        if other.is_some() {
            return Err(DialogueError::ConflictingFields { state: self.state });
        }
        let value = own.ok_or(DialogueError::MissingField {
            state: self.state,
            field,
        })?;
        Weight::new(value).map_err(|e| DialogueError::InvalidStoredValue {
            field,
            reason: e.to_string(),
        })
    }

    /// The category recorded at the last step of a flow.
    pub(crate) fn exercise_value(&self) -> Result<Category, DialogueError> {
        self.exercise.ok_or(DialogueError::MissingField {
            state: self.state,
            field: "exercise",
        })
    }

    pub(crate) fn reps_value(&self) -> Result<NonZeroU64, DialogueError> {
        self.count("reps", self.reps)
    }

    pub(crate) fn sets_value(&self) -> Result<NonZeroU64, DialogueError> {
        self.count("sets", self.sets)
    }

    fn count(&self, field: &'static str, value: Option<u64>) -> Result<NonZeroU64, DialogueError> {
        let value = value.ok_or(DialogueError::MissingField {
            state: self.state,
            field,
        })?;
        NonZeroU64::new(value).ok_or(DialogueError::InvalidStoredValue {
            field,
            reason: "must be greater than zero".to_string(),
        })
    }
}
