//! Session Store Port - Interface for persisting per-user sessions.
//!
//! Any key-value medium with atomic per-key get and put satisfies this port.
//! Serializing access per user is the caller's job (see
//! `application::SessionLocks`).

use async_trait::async_trait;

use crate::domain::dialogue::UserSession;
use crate::domain::foundation::UserId;

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    /// A record exists but cannot be read back as a session.
    ///
    /// Covers unknown state names, so it signals an internal consistency
    /// problem rather than a storage outage.
    #[error("Stored session for user {user_id} is corrupt: {reason}")]
    Corrupt { user_id: UserId, reason: String },

    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Port for loading and saving user sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the session of a user
    ///
    /// # Returns
    /// `None` when the user has never talked to the bot
    ///
    /// # Errors
    /// `SessionStoreError::Corrupt` if a record exists but is unreadable
    async fn load(&self, user_id: UserId) -> Result<Option<UserSession>, SessionStoreError>;

    /// Save the session of a user, replacing any previous record
    ///
    /// Either the whole record is written or the previous one stays in place.
    async fn save(&self, user_id: UserId, session: &UserSession) -> Result<(), SessionStoreError>;
}
