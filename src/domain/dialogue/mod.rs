//! Dialogue module - the per-user conversation state machine.
//!
//! # Components
//!
//! - `DialogueState` - flat persisted state, split into `Flow` and `Step`
//! - `UserSession` - the per-user record the state and answers live in
//! - `Intent` - help / restart / answer classification of raw text
//! - `respond` / `advance` - the transition engine
//! - `reply` - texts and button menus sent back

mod engine;
mod errors;
mod intent;
pub mod reply;
mod session;
mod state;

pub use engine::{advance, respond, Transition};
pub use errors::DialogueError;
pub use intent::Intent;
pub use reply::{Reply, TextFormat};
pub use session::UserSession;
pub use state::{DialogueState, Flow, Stage, Step};
