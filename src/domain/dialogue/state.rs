//! Dialogue state machine.
//!
//! Both flows share the same shape:
//!
//! ```text
//! init → option_select → {flow}_weight → {flow}_reps → {flow}_sets → {flow}_type → init
//! ```
//!
//! The persisted form is flat (`orm_reps`, `worker_type`, ...). The engine
//! works on [`Stage`], which splits a flat state into flow and step.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// The two complete dialogues the bot offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    /// Estimate a one-rep max from a lifted weight.
    OneRepMax,
    /// Derive the weight for a rep/set scheme from a one-rep max.
    TargetWeight,
}

impl Flow {
    /// Returns all flows in menu order.
    pub fn all() -> &'static [Flow] {
        &[Flow::OneRepMax, Flow::TargetWeight]
    }

    /// Internal code, also the prefix of the flow's state names.
    pub fn code(&self) -> &'static str {
        match self {
            Flow::OneRepMax => "orm",
            Flow::TargetWeight => "worker",
        }
    }
}

/// The questions asked inside a flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Weight,
    Reps,
    Sets,
    Exercise,
}

/// A dialogue state split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    OptionSelect,
    Collecting(Flow, Step),
}

/// Where a user is in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    /// Fresh or just finished; the next message gets the menu.
    #[default]
    Init,
    /// Menu shown, waiting for a flow choice.
    OptionSelect,
    OrmWeight,
    OrmReps,
    OrmSets,
    OrmType,
    WorkerWeight,
    WorkerReps,
    WorkerSets,
    WorkerType,
}

impl DialogueState {
    /// Returns every state.
    pub fn all() -> &'static [DialogueState] {
        use DialogueState::*;
        &[
            Init,
            OptionSelect,
            OrmWeight,
            OrmReps,
            OrmSets,
            OrmType,
            WorkerWeight,
            WorkerReps,
            WorkerSets,
            WorkerType,
        ]
    }

    /// Splits the flat state into flow and step.
    pub fn stage(&self) -> Stage {
        use DialogueState::*;
        match self {
            Init => Stage::Init,
            OptionSelect => Stage::OptionSelect,
            OrmWeight => Stage::Collecting(Flow::OneRepMax, Step::Weight),
            OrmReps => Stage::Collecting(Flow::OneRepMax, Step::Reps),
            OrmSets => Stage::Collecting(Flow::OneRepMax, Step::Sets),
            OrmType => Stage::Collecting(Flow::OneRepMax, Step::Exercise),
            WorkerWeight => Stage::Collecting(Flow::TargetWeight, Step::Weight),
            WorkerReps => Stage::Collecting(Flow::TargetWeight, Step::Reps),
            WorkerSets => Stage::Collecting(Flow::TargetWeight, Step::Sets),
            WorkerType => Stage::Collecting(Flow::TargetWeight, Step::Exercise),
        }
    }

    /// The flat state for a step of a flow.
    pub fn collecting(flow: Flow, step: Step) -> Self {
        use DialogueState::*;
        match (flow, step) {
            (Flow::OneRepMax, Step::Weight) => OrmWeight,
            (Flow::OneRepMax, Step::Reps) => OrmReps,
            (Flow::OneRepMax, Step::Sets) => OrmSets,
            (Flow::OneRepMax, Step::Exercise) => OrmType,
            (Flow::TargetWeight, Step::Weight) => WorkerWeight,
            (Flow::TargetWeight, Step::Reps) => WorkerReps,
            (Flow::TargetWeight, Step::Sets) => WorkerSets,
            (Flow::TargetWeight, Step::Exercise) => WorkerType,
        }
    }

    /// The flow this state belongs to, if any.
    pub fn flow(&self) -> Option<Flow> {
        match self.stage() {
            Stage::Collecting(flow, _) => Some(flow),
            Stage::Init | Stage::OptionSelect => None,
        }
    }

    /// Persisted name of the state.
    pub fn as_str(&self) -> &'static str {
        use DialogueState::*;
        match self {
            Init => "init",
            OptionSelect => "option_select",
            OrmWeight => "orm_weight",
            OrmReps => "orm_reps",
            OrmSets => "orm_sets",
            OrmType => "orm_type",
            WorkerWeight => "worker_weight",
            WorkerReps => "worker_reps",
            WorkerSets => "worker_sets",
            WorkerType => "worker_type",
        }
    }
}

impl fmt::Display for DialogueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StateMachine for DialogueState {
    fn can_transition_to(&self, target: &Self) -> bool {
        // Staying put is how invalid input is answered.
        self == target || self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self.stage() {
            Stage::Init => vec![DialogueState::OptionSelect],
            Stage::OptionSelect => Flow::all()
                .iter()
                .map(|flow| DialogueState::collecting(*flow, Step::Weight))
                .collect(),
            Stage::Collecting(flow, Step::Weight) => {
                vec![DialogueState::collecting(flow, Step::Reps)]
            }
            Stage::Collecting(flow, Step::Reps) => {
                vec![DialogueState::collecting(flow, Step::Sets)]
            }
            Stage::Collecting(flow, Step::Sets) => {
                vec![DialogueState::collecting(flow, Step::Exercise)]
            }
            Stage::Collecting(_, Step::Exercise) => vec![DialogueState::Init],
        }
    }
}
