//! Integration tests for the dispatcher loop.
//!
//! Verifies per-user ordering across poll batches, parallelism across users
//! and graceful shutdown, using the mock transport and in-memory store.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use liftcalc::adapters::{InMemorySessionStore, MockTransport};
use liftcalc::application::{
    DispatcherConfig, HandleMessageHandler, MessageDispatcher, SessionLocks,
};
use liftcalc::domain::dialogue::DialogueState;
use liftcalc::domain::foundation::UserId;
use liftcalc::ports::{InboundMessage, SessionStore, TransportError};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn msg(user: i64, id: i64, text: &str) -> InboundMessage {
    InboundMessage::new(UserId::new(user), id, text)
}

fn dispatcher(transport: &MockTransport, store: &InMemorySessionStore) -> Arc<MessageDispatcher> {
    let handler = HandleMessageHandler::new(
        Arc::new(store.clone()),
        Arc::new(transport.clone()),
        Arc::new(SessionLocks::new()),
    );
    Arc::new(MessageDispatcher::with_config(
        Arc::new(transport.clone()),
        Arc::new(handler),
        DispatcherConfig::default().with_receive_backoff(Duration::from_millis(10)),
    ))
}

async fn wait_for_replies(transport: &MockTransport, expected: usize) {
    for _ in 0..200 {
        if transport.sent().len() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "expected {} replies, got {}",
        expected,
        transport.sent().len()
    );
}

fn reply_ids_for(transport: &MockTransport, user: i64) -> Vec<Option<i64>> {
    transport
        .sent()
        .iter()
        .filter(|m| m.user_id == UserId::new(user))
        .map(|m| m.reply_to)
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn messages_of_one_user_apply_in_order_across_batches() {
    // Slow sends keep earlier tasks busy while later batches arrive.
    let transport = MockTransport::new()
        .with_send_delay(Duration::from_millis(15))
        .with_batch(vec![msg(1, 1, "/start"), msg(2, 1, "/start")])
        .with_batch(vec![msg(1, 2, "Calculate one-rep max"), msg(2, 2, "Calculate rep weight")])
        .with_batch(vec![msg(1, 3, "60"), msg(1, 4, "6"), msg(2, 3, "100")])
        .with_batch(vec![msg(1, 5, "5"), msg(1, 6, "Bench press"), msg(2, 4, "5")]);
    let store = InMemorySessionStore::new();
    let dispatcher = dispatcher(&transport, &store);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let running = {
        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move { dispatcher.run(shutdown_rx).await })
    };
    wait_for_replies(&transport, 10).await;
    shutdown_tx.send(true).unwrap();
    running.await.unwrap();

    assert_eq!(
        reply_ids_for(&transport, 1),
        vec![Some(1), Some(2), Some(3), Some(4), Some(5), Some(6)]
    );
    assert_eq!(reply_ids_for(&transport, 2), vec![Some(1), Some(2), Some(3), Some(4)]);

    let summary = transport.texts_for(UserId::new(1)).pop().unwrap();
    assert!(summary.contains("Your one-rep max: 75*"));
    assert_eq!(
        store.load(UserId::new(1)).await.unwrap().unwrap().state,
        DialogueState::Init
    );
    assert_eq!(
        store.load(UserId::new(2)).await.unwrap().unwrap().state,
        DialogueState::WorkerSets
    );
}

#[tokio::test]
async fn receive_errors_are_retried() {
    let transport = MockTransport::new()
        .with_receive_error(TransportError::Timeout { timeout_secs: 40 })
        .with_receive_error(TransportError::network("connection reset"))
        .with_batch(vec![msg(7, 1, "/help")]);
    let store = InMemorySessionStore::new();
    let dispatcher = dispatcher(&transport, &store);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let running = {
        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move { dispatcher.run(shutdown_rx).await })
    };
    wait_for_replies(&transport, 1).await;
    shutdown_tx.send(true).unwrap();
    running.await.unwrap();

    assert_eq!(transport.sent().len(), 1);
    assert_eq!(store.session_count().await, 0);
}

#[tokio::test]
async fn shutdown_waits_for_in_flight_messages() {
    let transport = MockTransport::new()
        .with_send_delay(Duration::from_millis(100))
        .with_batch(vec![msg(1, 1, "/start"), msg(2, 1, "/start"), msg(3, 1, "/start")]);
    let store = InMemorySessionStore::new();
    let dispatcher = dispatcher(&transport, &store);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let running = {
        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move { dispatcher.run(shutdown_rx).await })
    };
    while transport.pending_batches() > 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    shutdown_tx.send(true).unwrap();
    running.await.unwrap();

    assert_eq!(transport.sent().len(), 3);
}

#[tokio::test]
async fn dropped_shutdown_sender_stops_the_loop() {
    let transport = MockTransport::new();
    let store = InMemorySessionStore::new();
    let dispatcher = dispatcher(&transport, &store);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let running = {
        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move { dispatcher.run(shutdown_rx).await })
    };
    drop(shutdown_tx);

    tokio::time::timeout(Duration::from_secs(1), running)
        .await
        .expect("dispatcher should stop")
        .unwrap();
}
