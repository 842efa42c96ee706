//! Mock Message Transport for testing.
//!
//! Inbound batches are queued by the test and handed out in order; every
//! sent reply is recorded for verification.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new()
//!     .with_batch(vec![InboundMessage::new(UserId::new(1), 1, "/start")]);
//!
//! dispatcher.poll_once().await?;
//! assert_eq!(transport.sent().len(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::UserId;
use crate::ports::{InboundMessage, MessageTransport, OutboundMessage, TransportError};

/// Mock transport for testing.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    /// Inbound batches (consumed in order).
    inbound: Arc<Mutex<VecDeque<Result<Vec<InboundMessage>, TransportError>>>>,
    /// Delivered replies.
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    /// When set, every send fails.
    fail_sends: Arc<AtomicBool>,
    /// Simulated latency per send.
    send_delay: Duration,
    /// Pause when the inbound queue is empty, like an expired long poll.
    idle_delay: Duration,
}

impl MockTransport {
    /// Creates an empty mock transport.
    pub fn new() -> Self {
        Self {
            idle_delay: Duration::from_millis(5),
            ..Default::default()
        }
    }

    /// Queues a batch of inbound messages.
    pub fn with_batch(self, batch: Vec<InboundMessage>) -> Self {
        self.push_batch(batch);
        self
    }

    /// Queues a receive failure.
    pub fn with_receive_error(self, error: TransportError) -> Self {
        self.inbound.lock().unwrap().push_back(Err(error));
        self
    }

    /// Adds latency to every send.
    pub fn with_send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = delay;
        self
    }

    /// Queues a batch on a shared handle.
    pub fn push_batch(&self, batch: Vec<InboundMessage>) {
        self.inbound.lock().unwrap().push_back(Ok(batch));
    }

    /// Makes every following send fail (or succeed again).
    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    /// All replies sent so far.
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Reply texts sent to one user, in order.
    pub fn texts_for(&self, user_id: UserId) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.reply.text.clone())
            .collect()
    }

    /// Number of inbound batches not yet received.
    pub fn pending_batches(&self) -> usize {
        self.inbound.lock().unwrap().len()
    }
}

#[async_trait]
impl MessageTransport for MockTransport {
    async fn receive(&self) -> Result<Vec<InboundMessage>, TransportError> {
        let next = self.inbound.lock().unwrap().pop_front();
        match next {
            Some(batch) => batch,
            None => {
                sleep(self.idle_delay).await;
                Ok(Vec::new())
            }
        }
    }

    async fn send(&self, message: OutboundMessage) -> Result<(), TransportError> {
        if !self.send_delay.is_zero() {
            sleep(self.send_delay).await;
        }
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::network("mock send failure"));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
