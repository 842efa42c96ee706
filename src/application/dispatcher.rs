//! MessageDispatcher - long-poll loop that fans inbound messages out to tasks.
//!
//! Every message gets its own task. Tasks of the same user are chained
//! through [`UserQueue`], so one user's messages are handled in arrival order
//! even across poll batches while different users run in parallel.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `receive_backoff` | 5s | Pause after a failed poll before retrying |
//!
//! ## Graceful Shutdown
//!
//! The loop listens for a shutdown signal, stops polling, and waits for all
//! in-flight messages to finish before returning.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::handlers::HandleMessageHandler;
use crate::domain::foundation::UserId;
use crate::ports::{InboundMessage, MessageTransport, TransportError};

/// Configuration for the dispatcher.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Pause after a failed `receive` before polling again.
    pub receive_backoff: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            receive_backoff: Duration::from_secs(5),
        }
    }
}

impl DispatcherConfig {
    pub fn with_receive_backoff(mut self, backoff: Duration) -> Self {
        self.receive_backoff = backoff;
        self
    }
}

/// A task's place in its user's queue.
///
/// Dropping the turn (normally, or by panic) lets the next task of the same
/// user proceed.
#[derive(Debug)]
pub struct Turn {
    previous: Option<oneshot::Receiver<()>>,
    _done: oneshot::Sender<()>,
}

impl Turn {
    /// Waits until the user's previous task has finished.
    ///
    /// Cancel safe: a dropped `wait` keeps the turn behind the previous one.
    pub async fn wait(&mut self) {
        if let Some(previous) = self.previous.as_mut() {
            // An error only means the previous task dropped its turn.
            let _ = previous.await;
            self.previous = None;
        }
    }
}

/// Per-user FIFO of task turns.
#[derive(Debug, Default)]
pub struct UserQueue {
    tails: Mutex<HashMap<UserId, oneshot::Receiver<()>>>,
}

impl UserQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the next turn for a user, behind every turn handed out before.
    pub fn next_turn(&self, user_id: UserId) -> Turn {
        let (done, tail) = oneshot::channel();
        let mut tails = self.tails.lock().unwrap_or_else(PoisonError::into_inner);

        // Drop tails whose task has already finished.
        tails.retain(|_, rx| matches!(rx.try_recv(), Err(TryRecvError::Empty)));

        Turn {
            previous: tails.insert(user_id, tail),
            _done: done,
        }
    }

    /// Number of users with a task still running or queued.
    pub fn active_users(&self) -> usize {
        let mut tails = self.tails.lock().unwrap_or_else(PoisonError::into_inner);
        tails.retain(|_, rx| matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        tails.len()
    }
}

/// Background service that polls the transport and dispatches messages.
pub struct MessageDispatcher {
    transport: Arc<dyn MessageTransport>,
    handler: Arc<HandleMessageHandler>,
    queue: Arc<UserQueue>,
    config: DispatcherConfig,
}

impl MessageDispatcher {
    /// Create a dispatcher with default configuration.
    pub fn new(transport: Arc<dyn MessageTransport>, handler: Arc<HandleMessageHandler>) -> Self {
        Self::with_config(transport, handler, DispatcherConfig::default())
    }

    /// Create a dispatcher with custom configuration.
    pub fn with_config(
        transport: Arc<dyn MessageTransport>,
        handler: Arc<HandleMessageHandler>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            transport,
            handler,
            queue: Arc::new(UserQueue::new()),
            config,
        }
    }

    /// Run the poll loop until the shutdown signal is received.
    ///
    /// A dropped shutdown sender counts as a shutdown request.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut tasks: Vec<JoinHandle<()>> = Vec::new();
        tracing::info!("Dispatcher started");

        loop {
            reap_finished(&mut tasks).await;

            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }

                batch = self.transport.receive() => match batch {
                    Ok(messages) => tasks.extend(self.dispatch(messages)),
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            retry_in_secs = self.config.receive_backoff.as_secs(),
                            "Polling for messages failed"
                        );
                        tokio::select! {
                            _ = shutdown.changed() => {}
                            _ = tokio::time::sleep(self.config.receive_backoff) => {}
                        }
                    }
                },
            }
        }

        tracing::info!(in_flight = tasks.len(), "Dispatcher stopping, draining messages");
        for handle in tasks {
            log_join(handle.await);
        }
        tracing::info!("Dispatcher stopped");
    }

    /// Receive one batch, handle it, and wait for every message in it.
    ///
    /// Returns the number of messages dispatched.
    pub async fn poll_once(&self) -> Result<usize, TransportError> {
        let messages = self.transport.receive().await?;
        let handles = self.dispatch(messages);
        let count = handles.len();
        for handle in handles {
            log_join(handle.await);
        }
        Ok(count)
    }

    /// Spawn one task per message, each queued behind its user's previous one.
    fn dispatch(&self, messages: Vec<InboundMessage>) -> Vec<JoinHandle<()>> {
        messages
            .into_iter()
            .map(|message| {
                let mut turn = self.queue.next_turn(message.user_id);
                let handler = Arc::clone(&self.handler);

                tokio::spawn(async move {
                    turn.wait().await;
                    let user_id = message.user_id;

                    match handler.handle(message).await {
                        Ok(result) => tracing::debug!(
                            user_id = %user_id,
                            state = ?result.saved_state,
                            "Message handled"
                        ),
                        Err(e) if e.is_internal() => tracing::error!(
                            user_id = %user_id,
                            error = %e,
                            "Internal failure, sent failure reply"
                        ),
                        Err(e) => tracing::error!(
                            user_id = %user_id,
                            error = %e,
                            "Collaborator failure, no reply this turn"
                        ),
                    }

                    drop(turn);
                })
            })
            .collect()
    }
}

async fn reap_finished(tasks: &mut Vec<JoinHandle<()>>) {
    let (finished, running): (Vec<_>, Vec<_>) =
        tasks.drain(..).partition(|handle| handle.is_finished());
    *tasks = running;
    for handle in finished {
        log_join(handle.await);
    }
}

fn log_join(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        tracing::error!(error = %e, "Message task panicked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::messaging::MockTransport;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::application::SessionLocks;
    use crate::domain::dialogue::DialogueState;
    use crate::ports::SessionStore;
    use tokio::time::timeout;

    fn dispatcher(transport: &MockTransport, store: &InMemorySessionStore) -> MessageDispatcher {
        let handler = HandleMessageHandler::new(
            Arc::new(store.clone()),
            Arc::new(transport.clone()),
            Arc::new(SessionLocks::new()),
        );
        MessageDispatcher::with_config(
            Arc::new(transport.clone()),
            Arc::new(handler),
            DispatcherConfig::default().with_receive_backoff(Duration::from_millis(10)),
        )
    }

    fn msg(user: i64, id: i64, text: &str) -> InboundMessage {
        InboundMessage::new(UserId::new(user), id, text)
    }

    #[tokio::test]
    async fn turns_run_in_order() {
        let queue = UserQueue::new();
        let mut first = queue.next_turn(UserId::new(1));
        let mut second = queue.next_turn(UserId::new(1));

        first.wait().await;
        assert!(timeout(Duration::from_millis(20), second.wait()).await.is_err());

        drop(first);
        let mut third = queue.next_turn(UserId::new(1));
        timeout(Duration::from_millis(100), second.wait()).await.unwrap();
        drop(second);
        timeout(Duration::from_millis(100), third.wait()).await.unwrap();
    }

    #[tokio::test]
    async fn turns_of_other_users_are_independent() {
        let queue = UserQueue::new();
        let _busy = queue.next_turn(UserId::new(1));
        let mut other = queue.next_turn(UserId::new(2));

        timeout(Duration::from_millis(100), other.wait()).await.unwrap();
        assert_eq!(queue.active_users(), 2);
    }

    #[tokio::test]
    async fn finished_users_leave_the_queue() {
        let queue = UserQueue::new();
        drop(queue.next_turn(UserId::new(1)));
        drop(queue.next_turn(UserId::new(2)));

        assert_eq!(queue.active_users(), 0);
    }

    #[tokio::test]
    async fn poll_once_handles_batch_in_order() {
        let transport = MockTransport::new()
            .with_send_delay(Duration::from_millis(5))
            .with_batch(vec![
                msg(1, 1, "/start"),
                msg(1, 2, "Calculate one-rep max"),
                msg(1, 3, "60"),
            ]);
        let store = InMemorySessionStore::new();

        let count = dispatcher(&transport, &store).poll_once().await.unwrap();

        assert_eq!(count, 3);
        let replies: Vec<_> = transport.sent().iter().map(|m| m.reply_to).collect();
        assert_eq!(replies, vec![Some(1), Some(2), Some(3)]);
        let stored = store.load(UserId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.state, DialogueState::OrmReps);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_and_drains() {
        let transport = MockTransport::new()
            .with_receive_error(TransportError::network("connection reset"))
            .with_batch(vec![msg(1, 1, "/start"), msg(2, 2, "/start")]);
        let store = InMemorySessionStore::new();
        let dispatcher = Arc::new(dispatcher(&transport, &store));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let running = {
            let dispatcher = Arc::clone(&dispatcher);
            tokio::spawn(async move { dispatcher.run(shutdown_rx).await })
        };

        for _ in 0..100 {
            if transport.sent().len() == 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        shutdown_tx.send(true).unwrap();

        timeout(Duration::from_secs(1), running)
            .await
            .expect("dispatcher should stop")
            .unwrap();
        assert_eq!(transport.sent().len(), 2);
        assert_eq!(transport.pending_batches(), 0);
    }
}
