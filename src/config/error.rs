//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// IO error while reading the file.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON or does not match the schema.
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Keys the schema does not know, rejected under [`SchemaDriftPolicy::Fail`].
    ///
    /// [`SchemaDriftPolicy::Fail`]: super::SchemaDriftPolicy::Fail
    #[error("unknown configuration keys in {path}: {}", keys.join(", "))]
    SchemaDrift { path: PathBuf, keys: Vec<String> },
}

/// Result alias for configuration loading.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
