//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - durable per-user session records
//! - `MessageTransport` - inbound messages and outbound replies

mod message_transport;
mod session_store;

pub use message_transport::{InboundMessage, MessageTransport, OutboundMessage, TransportError};
pub use session_store::{SessionStore, SessionStoreError};
