//! In-Memory Session Store Adapter
//!
//! Keeps sessions in a map. Used by tests and by the `memory` storage
//! backend for throwaway local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialogue::UserSession;
use crate::domain::foundation::UserId;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for user sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<UserId, UserSession>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, user_id: UserId) -> Result<Option<UserSession>, SessionStoreError> {
        Ok(self.sessions.read().await.get(&user_id).cloned())
    }

    async fn save(&self, user_id: UserId, session: &UserSession) -> Result<(), SessionStoreError> {
        self.sessions.write().await.insert(user_id, session.clone());
        Ok(())
    }
}
