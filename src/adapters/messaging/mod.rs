//! Messaging Adapters
//!
//! Implementations of the MessageTransport port.
//!
//! - **TelegramTransport** - Telegram Bot API via long polling
//! - **MockTransport** - Scripted inbound batches, recorded replies (testing)

mod mock_transport;
mod telegram;
mod telegram_types;

pub use mock_transport::MockTransport;
pub use telegram::{TelegramConfig, TelegramTransport};
