//! Logging configuration

use serde::Deserialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` overrides this when set
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Directory for the daily-rotated log file
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Also write logs to `<directory>/log.YYYY-MM-DD`
    #[serde(default = "default_file_logging")]
    pub file_logging: bool,
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.filter)
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))?;
        if self.file_logging && self.directory.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("LIFTCALC__LOGGING__DIRECTORY"));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            directory: default_directory(),
            file_logging: default_file_logging(),
        }
    }
}

fn default_filter() -> String {
    "info,liftcalc=debug".to_string()
}

fn default_directory() -> PathBuf {
    PathBuf::from("logs")
}

fn default_file_logging() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.filter, "info,liftcalc=debug");
        assert_eq!(config.directory, PathBuf::from("logs"));
        assert!(config.file_logging);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_bad_filter() {
        let config = LoggingConfig {
            filter: "liftcalc=loud".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLogFilter(_))
        ));
    }

    #[test]
    fn test_validation_directory_only_needed_for_files() {
        let config = LoggingConfig {
            directory: PathBuf::new(),
            file_logging: false,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
