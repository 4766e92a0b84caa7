//! Error types for convertible-core

use thiserror::Error;

use crate::converter::ConvertError;

/// Result type alias for convertible-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in convertible-core
#[derive(Error, Debug)]
pub enum Error {
    /// An argument could not be converted and no handler was registered
    #[error(transparent)]
    Conversion(#[from] ConvertError),

    /// Binding configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML configuration
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// Regex pattern for a pattern converter failed to compile
    #[error("invalid regex pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern that failed
        pattern: String,
        /// Error message
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
