//! HandleMessageHandler - Command handler for one inbound chat message.
//!
//! Runs under the user's session lock: load → advance → save → send. Help
//! never touches the store, and a restart tolerates an unreadable record so
//! a damaged session can always be reset with `/start`.

use std::sync::Arc;

use crate::application::SessionLocks;
use crate::domain::dialogue::{reply, respond, DialogueError, DialogueState, Intent, Reply, UserSession};
use crate::ports::{
    InboundMessage, MessageTransport, OutboundMessage, SessionStore, SessionStoreError,
    TransportError,
};

/// Result of a handled message.
#[derive(Debug, Clone)]
pub struct HandleMessageResult {
    /// Reply delivered to the user.
    pub reply: Reply,
    /// State written to the store, or `None` when the store was not touched.
    pub saved_state: Option<DialogueState>,
}

/// Errors from handling a message.
#[derive(Debug, thiserror::Error)]
pub enum HandleMessageError {
    #[error("Session store failed: {0}")]
    Store(#[from] SessionStoreError),

    #[error("Dialogue is inconsistent: {0}")]
    Dialogue(#[from] DialogueError),

    #[error("Failed to deliver reply: {0}")]
    Transport(#[from] TransportError),
}

impl HandleMessageError {
    /// True for faults in our own data, as opposed to a collaborator outage.
    ///
    /// The user got the generic failure reply for these.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            HandleMessageError::Dialogue(_)
                | HandleMessageError::Store(SessionStoreError::Corrupt { .. })
        )
    }
}

/// Handler for inbound messages.
pub struct HandleMessageHandler {
    store: Arc<dyn SessionStore>,
    transport: Arc<dyn MessageTransport>,
    locks: Arc<SessionLocks>,
}

impl HandleMessageHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        transport: Arc<dyn MessageTransport>,
        locks: Arc<SessionLocks>,
    ) -> Self {
        Self {
            store,
            transport,
            locks,
        }
    }

    pub async fn handle(
        &self,
        message: InboundMessage,
    ) -> Result<HandleMessageResult, HandleMessageError> {
        let user_id = message.user_id;
        tracing::info!(user_id = %user_id, text = %message.text, "Inbound message");

        let _guard = self.locks.lock(user_id).await;
        let intent = Intent::parse(&message.text);

        // 1. Help is answered without reading or writing the record
        if matches!(intent, Intent::Help) {
            let help = reply::help();
            self.deliver(&message, help.clone()).await?;
            return Ok(HandleMessageResult {
                reply: help,
                saved_state: None,
            });
        }

        // 2. Load the current session. A restart replaces whatever is stored,
        //    so an unreadable record only loses its rollback value.
        let (current, rollback) = match self.store.load(user_id).await {
            Ok(stored) => {
                let current = match intent {
                    Intent::Restart => UserSession::new(),
                    _ => stored.clone().unwrap_or_default(),
                };
                (current, Some(stored))
            }
            Err(e @ SessionStoreError::Corrupt { .. }) => {
                if !matches!(intent, Intent::Restart) {
                    return Err(self.reject(&message, e.into()).await);
                }
                tracing::warn!(user_id = %user_id, error = %e, "Discarding unreadable session on restart");
                (UserSession::new(), None)
            }
            Err(e) => return Err(e.into()),
        };

        // 3. Advance the dialogue
        let transition = match respond(&current, intent) {
            Ok(transition) => transition,
            Err(e) => return Err(self.reject(&message, e.into()).await),
        };
        tracing::debug!(
            user_id = %user_id,
            from = %current.state,
            to = %transition.session.state,
            "Dialogue advanced"
        );

        // 4. Persist, then reply
        self.store.save(user_id, &transition.session).await?;

        if let Err(e) = self.deliver(&message, transition.reply.clone()).await {
            if let Some(previous) = rollback {
                self.restore(&message, previous).await;
            }
            return Err(e.into());
        }

        Ok(HandleMessageResult {
            reply: transition.reply,
            saved_state: Some(transition.session.state),
        })
    }

    async fn deliver(&self, message: &InboundMessage, reply: Reply) -> Result<(), TransportError> {
        self.transport
            .send(OutboundMessage::reply_to(message, reply))
            .await
    }

    /// Sends the generic failure reply and hands the error back.
    async fn reject(&self, message: &InboundMessage, error: HandleMessageError) -> HandleMessageError {
        if let Err(send_error) = self.deliver(message, reply::failure()).await {
            tracing::warn!(
                user_id = %message.user_id,
                error = %send_error,
                "Could not deliver failure reply"
            );
        }
        error
    }

    /// Puts back the record that was in place before an undelivered reply,
    /// so the user can resend the same input. A missing record is put back
    /// as a fresh session, which loads the same way.
    async fn restore(&self, message: &InboundMessage, previous: Option<UserSession>) {
        let previous = previous.unwrap_or_default();
        if let Err(e) = self.store.save(message.user_id, &previous).await {
            tracing::error!(
                user_id = %message.user_id,
                error = %e,
                "Could not restore session after failed delivery"
            );
        }
    }
}
