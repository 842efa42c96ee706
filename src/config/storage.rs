//! Session storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where user sessions are kept
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per user under `data_dir`
    #[default]
    File,
    /// Process memory; lost on restart
    Memory,
    /// Redis at `redis_url`
    Redis,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Connection URL for the redis backend
    pub redis_url: Option<String>,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.backend {
            StorageBackend::File if self.data_dir.as_os_str().is_empty() => {
                Err(ValidationError::MissingRequired("LIFTCALC__STORAGE__DATA_DIR"))
            }
            StorageBackend::Redis => match self.redis_url.as_deref() {
                None | Some("") => Err(ValidationError::MissingRequired(
                    "LIFTCALC__STORAGE__REDIS_URL",
                )),
                Some(url) if !url.starts_with("redis://") && !url.starts_with("rediss://") => {
                    Err(ValidationError::InvalidRedisUrl)
                }
                Some(_) => Ok(()),
            },
            _ => Ok(()),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
            redis_url: None,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("user_data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::File);
        assert_eq!(config.data_dir, PathBuf::from("user_data"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_redis_requires_url() {
        let config = StorageConfig {
            backend: StorageBackend::Redis,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("LIFTCALC__STORAGE__REDIS_URL"))
        );
    }

    #[test]
    fn test_validation_redis_url_scheme() {
        let config = StorageConfig {
            backend: StorageBackend::Redis,
            redis_url: Some("http://localhost:6379".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidRedisUrl));
    }

    #[test]
    fn test_validation_file_requires_dir() {
        let config = StorageConfig {
            data_dir: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_memory_backend_ignores_paths() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::new(),
            redis_url: None,
        };
        assert!(config.validate().is_ok());
    }
}
