//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Poll timeout must be between 1 and 50 seconds, got {0}")]
    InvalidTimeout(u64),

    #[error("Invalid API URL format")]
    InvalidApiUrl,

    #[error("Invalid proxy URL format (expected http, https, socks5 or socks5h)")]
    InvalidProxyUrl,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
