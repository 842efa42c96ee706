//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, validation errors, state machine trait)
//! - `strength` - One-rep max and rep weight formulas
//! - `vocabulary` - Button labels, commands and their codes
//! - `dialogue` - Per-user conversation state machine

pub mod dialogue;
pub mod foundation;
pub mod strength;
pub mod vocabulary;
