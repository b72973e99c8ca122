//! Registry error types

use thiserror::Error;

/// Errors raised by in-memory registry mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No author with this full name
    #[error("Author not found: {0}")]
    AuthorNotFound(String),

    /// Full names are unique within the registry
    #[error("Author already registered: {0}")]
    AlreadyRegistered(String),

    /// A labeled affiliation must be a single-key map
    #[error("Invalid affiliation entry: {0}")]
    InvalidAffiliation(String),
}
