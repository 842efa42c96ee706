//! liftcalc - Telegram bot for strength training arithmetic
//!
//! Walks a user through a short button-and-number dialogue and replies with
//! an estimated one-rep max, or the working weight for a given rep/set
//! scheme.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
