//! Application handlers.
//!
//! Command handlers that orchestrate the dialogue against the ports.

mod handle_message;

pub use handle_message::{HandleMessageError, HandleMessageHandler, HandleMessageResult};
