//! Application layer - Handlers and the services that drive them.
//!
//! Orchestrates the pure dialogue engine against the session store and the
//! message transport.

pub mod dispatcher;
pub mod handlers;
mod session_locks;

pub use dispatcher::{DispatcherConfig, MessageDispatcher, UserQueue};
pub use handlers::{HandleMessageError, HandleMessageHandler, HandleMessageResult};
pub use session_locks::{SessionGuard, SessionLocks};
