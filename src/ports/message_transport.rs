//! Message Transport Port - Interface to the chat platform.

use async_trait::async_trait;

use crate::domain::dialogue::Reply;
use crate::domain::foundation::UserId;

/// A text message received from a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub user_id: UserId,
    /// Platform id of the message, used to thread the reply.
    pub message_id: i64,
    pub text: String,
}

impl InboundMessage {
    pub fn new(user_id: UserId, message_id: i64, text: impl Into<String>) -> Self {
        Self {
            user_id,
            message_id,
            text: text.into(),
        }
    }
}

/// A reply to deliver to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub user_id: UserId,
    pub reply_to: Option<i64>,
    pub reply: Reply,
}

impl OutboundMessage {
    /// Builds a reply threaded under the message that prompted it.
    pub fn reply_to(message: &InboundMessage, reply: Reply) -> Self {
        Self {
            user_id: message.user_id,
            reply_to: Some(message.message_id),
            reply,
        }
    }
}

/// Errors from the messaging platform
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Platform rejected request: {0}")]
    Rejected(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    pub fn network(message: impl Into<String>) -> Self {
        TransportError::Network(message.into())
    }
}

/// Port for receiving and sending chat messages
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Wait for the next batch of inbound text messages, in arrival order.
    ///
    /// May return an empty batch when a long poll times out.
    async fn receive(&self) -> Result<Vec<InboundMessage>, TransportError>;

    /// Deliver a reply.
    async fn send(&self, message: OutboundMessage) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_to_threads_under_inbound_message() {
        let inbound = InboundMessage::new(UserId::new(5), 77, "60");
        let outbound = OutboundMessage::reply_to(&inbound, Reply::plain("ok"));
        assert_eq!(outbound.user_id, UserId::new(5));
        assert_eq!(outbound.reply_to, Some(77));
    }

    #[test]
    fn timeout_error_displays_seconds() {
        let err = TransportError::Timeout { timeout_secs: 40 };
        assert_eq!(err.to_string(), "Request timed out after 40s");
    }
}
