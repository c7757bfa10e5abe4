//! Error types for the credential subsystem.

use thiserror::Error;

/// Errors that can occur in credential operations.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Credential with the given identity key not found
    #[error("credential not found: {key}")]
    NotFound {
        /// The identity key that was not found
        key: String,
    },

    /// Credentials file not found
    #[error("credentials file not found at {path}")]
    FileNotFound {
        /// Expected file path
        path: String,
    },

    /// Failed to read the credentials file
    #[error("failed to load credentials from {path}: {source}")]
    LoadError {
        /// Path to the credentials file
        path: String,
        /// Underlying error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse the credentials TOML
    #[error("failed to parse credentials TOML in {path}: {source}")]
    ParseError {
        /// Path to the credentials file
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// Invalid credential (validation failed)
    #[error("invalid credential {key}: {reason}")]
    ValidationError {
        /// Identity key of the credential being validated
        key: String,
        /// Reason for validation failure
        reason: String,
    },

    /// Could not resolve the default credentials location
    #[error("config error: {0}")]
    Config(#[from] sleuth_core::ConfigError),
}

/// Result type for credential operations.
pub type Result<T> = std::result::Result<T, CredentialError>;
