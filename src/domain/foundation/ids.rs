//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a bot user.
///
/// Wraps the Telegram chat id the conversation happens in. A private chat
/// maps one person to one session record; a group chat shares one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a UserId from a raw chat id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw chat id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_displays_raw_value() {
        assert_eq!(UserId::new(42).to_string(), "42");
        assert_eq!(UserId::new(-100123).to_string(), "-100123");
    }

    #[test]
    fn user_id_serializes_transparently() {
        let json = serde_json::to_string(&UserId::new(7)).unwrap();
        assert_eq!(json, "7");

        let id: UserId = serde_json::from_str("7").unwrap();
        assert_eq!(id, UserId::new(7));
    }
}
