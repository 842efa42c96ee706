//! Redis-backed Session Store Adapter
//!
//! Each session is a JSON string under `liftcalc:session:<user_id>`.
//! A single `SET` replaces the whole record, which gives the per-key
//! atomic put the port asks for.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::dialogue::UserSession;
use crate::domain::foundation::UserId;
use crate::ports::{SessionStore, SessionStoreError};

const KEY_PREFIX: &str = "liftcalc:session";

/// Redis storage for user sessions
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
}

impl RedisSessionStore {
    /// Create a store over an established connection.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Connect to the server at `url` (`redis://` or `rediss://`).
    pub async fn connect(url: &str) -> Result<Self, SessionStoreError> {
        let client = redis::Client::open(url)
            .map_err(|e: redis::RedisError| SessionStoreError::BackendError(e.to_string()))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e: redis::RedisError| SessionStoreError::BackendError(e.to_string()))?;
        Ok(Self::new(conn))
    }

    pub(crate) fn key(user_id: UserId) -> String {
        format!("{}:{}", KEY_PREFIX, user_id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, user_id: UserId) -> Result<Option<UserSession>, SessionStoreError> {
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn
            .get(Self::key(user_id))
            .await
            .map_err(|e: redis::RedisError| SessionStoreError::BackendError(e.to_string()))?;

        raw.map(|json| {
            serde_json::from_str(&json).map_err(|e| SessionStoreError::Corrupt {
                user_id,
                reason: e.to_string(),
            })
        })
        .transpose()
    }

    async fn save(&self, user_id: UserId, session: &UserSession) -> Result<(), SessionStoreError> {
        let json = serde_json::to_string(session)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(Self::key(user_id), json)
            .await
            .map_err(|e: redis::RedisError| SessionStoreError::BackendError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_per_user() {
        assert_eq!(RedisSessionStore::key(UserId::new(42)), "liftcalc:session:42");
        assert_eq!(RedisSessionStore::key(UserId::new(-7)), "liftcalc:session:-7");
    }

    #[tokio::test]
    async fn connect_rejects_malformed_url() {
        let result = RedisSessionStore::connect("not-a-url").await;
        assert!(matches!(result, Err(SessionStoreError::BackendError(_))));
    }
}
