//! Logging setup.
//!
//! Installs a `tracing` subscriber with an `EnvFilter`, a stdout layer and,
//! when enabled, a plain-text layer writing to `<directory>/log.YYYY-MM-DD`
//! through a non-blocking writer. `RUST_LOG` overrides the configured filter.

use std::path::PathBuf;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "log";

/// Errors while setting up logging
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Cannot open log directory {path}: {reason}")]
    Directory { path: PathBuf, reason: String },

    #[error("Failed to install subscriber: {0}")]
    Install(String),
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = build_filter(config)?;

    let (file_layer, guard) = match file_writer(config)? {
        Some((writer, guard)) => (
            Some(fmt::layer().with_ansi(false).with_writer(writer)),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    Ok(guard)
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    let directives = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(from_env) if !from_env.trim().is_empty() => from_env,
        _ => config.filter.clone(),
    };
    EnvFilter::try_new(directives).map_err(|e| LoggingError::Filter(e.to_string()))
}

fn file_writer(config: &LoggingConfig) -> Result<Option<(NonBlocking, WorkerGuard)>, LoggingError> {
    if !config.file_logging {
        return Ok(None);
    }

    std::fs::create_dir_all(&config.directory).map_err(|e| LoggingError::Directory {
        path: config.directory.clone(),
        reason: e.to_string(),
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(&config.directory)
        .map_err(|e| LoggingError::Directory {
            path: config.directory.clone(),
            reason: e.to_string(),
        })?;

    Ok(Some(tracing_appender::non_blocking(appender)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn file_logging_disabled_opens_nothing() {
        let config = LoggingConfig {
            file_logging: false,
            ..Default::default()
        };
        assert!(file_writer(&config).unwrap().is_none());
    }

    #[test]
    fn file_writer_creates_dated_log_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = LoggingConfig {
            directory: temp_dir.path().join("logs"),
            ..Default::default()
        };

        let (mut writer, guard) = file_writer(&config).unwrap().unwrap();
        writer.write_all(b"user 42 said 60\n").unwrap();
        drop(guard);

        let files: Vec<_> = std::fs::read_dir(temp_dir.path().join("logs"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with("log."), "unexpected file {}", files[0]);
    }

    #[test]
    fn configured_filter_is_parsed() {
        let config = LoggingConfig {
            filter: "warn,liftcalc=trace".to_string(),
            ..Default::default()
        };
        assert!(build_filter(&config).is_ok());
    }
}
