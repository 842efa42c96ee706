//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Session stores (file, in-memory, Redis)
//! - `messaging` - Message transports (Telegram, mock)

pub mod messaging;
pub mod storage;

pub use messaging::{MockTransport, TelegramConfig, TelegramTransport};
pub use storage::{FileSessionStore, InMemorySessionStore, RedisSessionStore};
