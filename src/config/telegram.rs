//! Telegram Bot API configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const PROXY_SCHEMES: &[&str] = &["http://", "https://", "socks5://", "socks5h://"];

/// Telegram configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token from BotFather
    pub token: Option<Secret<String>>,

    /// Bot API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Long-poll window for getUpdates, in seconds
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,

    /// Optional proxy for all Bot API requests
    pub proxy: Option<String>,
}

impl TelegramConfig {
    /// Get poll timeout as Duration
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    /// Token value, if one is configured and not blank
    pub fn token(&self) -> Option<&str> {
        self.token
            .as_ref()
            .map(|t| t.expose_secret().as_str())
            .filter(|t| !t.trim().is_empty())
    }

    /// Validate Telegram configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token().is_none() {
            return Err(ValidationError::MissingRequired("LIFTCALC__TELEGRAM__TOKEN"));
        }
        if !(1..=50).contains(&self.poll_timeout_secs) {
            return Err(ValidationError::InvalidTimeout(self.poll_timeout_secs));
        }
        if !self.api_url.starts_with("https://") && !self.api_url.starts_with("http://") {
            return Err(ValidationError::InvalidApiUrl);
        }
        if let Some(proxy) = &self.proxy {
            if !PROXY_SCHEMES.iter().any(|scheme| proxy.starts_with(scheme)) {
                return Err(ValidationError::InvalidProxyUrl);
            }
        }
        Ok(())
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_api_url(),
            poll_timeout_secs: default_poll_timeout(),
            proxy: None,
        }
    }
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_token() -> TelegramConfig {
        TelegramConfig {
            token: Some(Secret::new("123456:ABC-DEF".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_telegram_config_defaults() {
        let config = TelegramConfig::default();
        assert!(config.token.is_none());
        assert_eq!(config.api_url, "https://api.telegram.org");
        assert_eq!(config.poll_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validation_missing_token() {
        assert_eq!(
            TelegramConfig::default().validate(),
            Err(ValidationError::MissingRequired("LIFTCALC__TELEGRAM__TOKEN"))
        );
    }

    #[test]
    fn test_validation_blank_token() {
        let config = TelegramConfig {
            token: Some(Secret::new("  ".to_string())),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_timeout_range() {
        for secs in [0, 51] {
            let config = TelegramConfig {
                poll_timeout_secs: secs,
                ..with_token()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout(secs)));
        }
    }

    #[test]
    fn test_validation_proxy_scheme() {
        let config = TelegramConfig {
            proxy: Some("ftp://proxy:21".to_string()),
            ..with_token()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidProxyUrl));

        let config = TelegramConfig {
            proxy: Some("socks5://127.0.0.1:1080".to_string()),
            ..with_token()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(with_token().validate().is_ok());
    }
}
