//! Error types for authors-core

use std::path::PathBuf;

use authors_domain::RegistryError;
use thiserror::Error;

/// Result type alias for authors operations
pub type Result<T> = std::result::Result<T, AuthorsError>;

/// Main error type for authors operations
#[derive(Error, Debug)]
pub enum AuthorsError {
    /// Bad author-list source or malformed arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No registry record matches the queried name
    #[error("No known author matches \"{0}\"")]
    NotFound(String),

    /// Refused to overwrite the registry with nothing
    #[error("Refusing to write an empty registry to {0}")]
    RegistryEmpty(PathBuf),

    /// Registry mutation errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Registry file could not be parsed or written
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<toml::de::Error> for AuthorsError {
    fn from(err: toml::de::Error) -> Self {
        AuthorsError::Config(err.to_string())
    }
}

impl From<tempfile::PersistError> for AuthorsError {
    fn from(err: tempfile::PersistError) -> Self {
        AuthorsError::Io(err.error)
    }
}
