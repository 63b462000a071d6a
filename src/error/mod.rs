//! Error handling module for clipforge

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for clipforge start-up and command execution
#[derive(Error, Debug)]
pub enum ClipforgeError {
    /// Configuration value out of range or inconsistent
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Configuration file could not be parsed
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Environment override could not be interpreted
    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: String, value: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error raised by the job pipeline
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type alias for clipforge operations
pub type ClipforgeResult<T> = std::result::Result<T, ClipforgeError>;
