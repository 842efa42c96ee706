//! File-based Session Store Adapter
//!
//! One pretty-printed JSON file per user (`user_<id>.json`) under a base
//! directory. Records are written to a temporary file first and renamed
//! over the old one, so a failed write never leaves a half-written record.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::dialogue::UserSession;
use crate::domain::foundation::UserId;
use crate::ports::{SessionStore, SessionStoreError};

/// File-based storage for user sessions
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// Create a new file store with a base directory
    ///
    /// The directory is created on first save.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::new("./user_data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the record path for a user
    fn session_file_path(&self, user_id: UserId) -> PathBuf {
        self.base_path.join(format!("user_{}.json", user_id))
    }

    /// Get the scratch path a record is written to before the rename
    fn temp_file_path(&self, user_id: UserId) -> PathBuf {
        self.base_path.join(format!("user_{}.json.tmp", user_id))
    }

    async fn ensure_dir(&self) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, user_id: UserId) -> Result<Option<UserSession>, SessionStoreError> {
        let file_path = self.session_file_path(user_id);

        let json = match fs::read_to_string(&file_path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionStoreError::IoError(e.to_string())),
        };

        let session = serde_json::from_str(&json).map_err(|e| SessionStoreError::Corrupt {
            user_id,
            reason: e.to_string(),
        })?;

        Ok(Some(session))
    }

    async fn save(&self, user_id: UserId, session: &UserSession) -> Result<(), SessionStoreError> {
        self.ensure_dir().await?;

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        let temp_path = self.temp_file_path(user_id);
        fs::write(&temp_path, json)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        fs::rename(&temp_path, self.session_file_path(user_id))
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        Ok(())
    }
}
