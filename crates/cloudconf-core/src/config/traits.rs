//! Clouds document loader trait and error type

use std::path::PathBuf;

use crate::types::CloudMap;

/// Loads the three layered clouds documents
///
/// Implementations:
/// - `FileCloudsLoader`: searches the standard clouds.yaml locations
/// - `MemoryCloudsLoader`: in-memory documents for testing
///
/// Only `load_clouds` may fail with `ConfigError::FileNotFound`; the
/// public catalog and the secure overlay are optional and a missing
/// document is returned as an empty map.
pub trait CloudsLoader: Send + Sync {
    /// Load clouds.yaml
    fn load_clouds(&self) -> ConfigResult<CloudMap>;

    /// Load clouds-public.yaml (vendor profiles)
    fn load_public_clouds(&self) -> ConfigResult<CloudMap>;

    /// Load secure.yaml (credential overlay)
    fn load_secure_clouds(&self) -> ConfigResult<CloudMap>;
}

/// Errors that can occur while resolving cloud configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{file} not found (searched: {searched})")]
    FileNotFound { file: String, searched: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Cloud not found: {0}")]
    CloudNotFound(String),

    #[error("Profile {0} does not exist in clouds-public.yaml")]
    ProfileNotFound(String),

    #[error("Missing input for argument [{0}]")]
    MissingRequiredField(String),

    #[error("Invalid identity API version: {0}")]
    UnsupportedIdentityVersion(String),

    #[error("Invalid volume API version: {0}")]
    UnsupportedVolumeVersion(String),

    #[error("Unable to create a service client for {0}")]
    UnsupportedService(String),

    #[error("TLS configuration error: {0}")]
    Tls(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ConfigError {
    /// Create a file-not-found error listing the searched locations
    pub fn file_not_found(file: impl Into<String>, searched: &[PathBuf]) -> Self {
        let searched = searched
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::FileNotFound {
            file: file.into(),
            searched,
        }
    }

    /// Create an IO error for a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error for a named document
    pub fn parse(file: impl Into<String>, source: serde_yaml::Error) -> Self {
        Self::Parse {
            file: file.into(),
            source,
        }
    }

    /// Create a missing-required-field error
    pub fn missing(argument: impl Into<String>) -> Self {
        Self::MissingRequiredField(argument.into())
    }

    /// Whether this is one of the "not found" conditions rather than an
    /// I/O or parse failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::FileNotFound { .. }
                | ConfigError::CloudNotFound(_)
                | ConfigError::ProfileNotFound(_)
        )
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
