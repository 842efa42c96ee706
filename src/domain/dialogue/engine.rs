//! Dialogue engine - one message in, next session and reply out.
//!
//! Pure: no I/O and no clock. The application layer loads the session,
//! calls [`respond`], saves the returned session and sends the reply.

use std::num::NonZeroU64;

use super::errors::DialogueError;
use super::intent::Intent;
use super::reply::{self, Reply, SummaryInputs};
use super::session::UserSession;
use super::state::{DialogueState, Flow, Stage, Step};
use crate::domain::foundation::StateMachine;
use crate::domain::strength::{StrengthCalculator, Weight};
use crate::domain::vocabulary;

/// Outcome of one message.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: UserSession,
    pub reply: Reply,
}

impl Transition {
    fn stay(session: &UserSession, reply: Reply) -> Self {
        Self {
            session: session.clone(),
            reply,
        }
    }
}

/// Applies a classified message to a session.
pub fn respond(session: &UserSession, intent: Intent<'_>) -> Result<Transition, DialogueError> {
    match intent {
        Intent::Help => Ok(Transition::stay(session, reply::help())),
        Intent::Restart => advance(&UserSession::new(), ""),
        Intent::Answer(text) => advance(session, text),
    }
}

/// Handles an answer according to the session's current state.
///
/// Unacceptable input leaves the session unchanged and re-prompts.
pub fn advance(session: &UserSession, input: &str) -> Result<Transition, DialogueError> {
    let input = input.trim();

    match session.state.stage() {
        Stage::Init => {
            let mut next = session.clone();
            next.state = session.state.transition_to(DialogueState::OptionSelect)?;
            Ok(Transition {
                session: next,
                reply: reply::menu(),
            })
        }

        Stage::OptionSelect => match vocabulary::flow_for_label(input) {
            Some(flow) => {
                let mut next = session.clone();
                next.state = session
                    .state
                    .transition_to(DialogueState::collecting(flow, Step::Weight))?;
                Ok(Transition {
                    session: next,
                    reply: reply::prompt(flow, Step::Weight),
                })
            }
            None => Ok(Transition::stay(session, reply::menu_retry())),
        },

        Stage::Collecting(flow, Step::Weight) => match parse_weight(input) {
            Some(value) => {
                let mut next = session.clone();
                next.set_load(flow, value);
                step_forward(next, flow, Step::Reps)
            }
            None => Ok(Transition::stay(session, reply::retry(flow, Step::Weight))),
        },

        Stage::Collecting(flow, Step::Reps) => match parse_count(input) {
            Some(reps) => {
                let mut next = session.clone();
                next.reps = Some(reps.get());
                step_forward(next, flow, Step::Sets)
            }
            None => Ok(Transition::stay(session, reply::retry(flow, Step::Reps))),
        },

        Stage::Collecting(flow, Step::Sets) => match parse_count(input) {
            Some(sets) => {
                let mut next = session.clone();
                next.sets = Some(sets.get());
                step_forward(next, flow, Step::Exercise)
            }
            None => Ok(Transition::stay(session, reply::retry(flow, Step::Sets))),
        },

        Stage::Collecting(flow, Step::Exercise) => match vocabulary::category_for_label(input) {
            Some(category) => {
                let mut answered = session.clone();
                answered.exercise = Some(category);
                complete(&answered, flow, input)
            }
            None => Ok(Transition::stay(session, reply::retry(flow, Step::Exercise))),
        },
    }
}

fn step_forward(mut next: UserSession, flow: Flow, step: Step) -> Result<Transition, DialogueError> {
    next.state = next
        .state
        .transition_to(DialogueState::collecting(flow, step))?;
    Ok(Transition {
        session: next,
        reply: reply::prompt(flow, step),
    })
}

/// Computes the result from a fully answered record and clears it.
fn complete(
    session: &UserSession,
    flow: Flow,
    exercise_label: &str,
) -> Result<Transition, DialogueError> {
    let load = session.load_for(flow)?;
    let reps = session.reps_value()?;
    let sets = session.sets_value()?;
    let category = session.exercise_value()?;

    let result = match flow {
        Flow::OneRepMax => StrengthCalculator::one_rep_max(load, reps, sets, category),
        Flow::TargetWeight => StrengthCalculator::target_weight(load, reps, sets, category),
    };

    let inputs = SummaryInputs {
        load,
        reps,
        sets,
        exercise_label,
    };

    let next = UserSession {
        state: session.state.transition_to(DialogueState::Init)?,
        ..UserSession::default()
    };

    Ok(Transition {
        session: next,
        reply: reply::summary(flow, &inputs, result),
    })
}

/// A finite number above zero; fractions allowed.
fn parse_weight(input: &str) -> Option<Weight> {
    input.parse::<f64>().ok().and_then(|v| Weight::new(v).ok())
}

/// A whole number above zero; `"6.0"` is rejected.
fn parse_count(input: &str) -> Option<NonZeroU64> {
    input.parse::<NonZeroU64>().ok()
}
