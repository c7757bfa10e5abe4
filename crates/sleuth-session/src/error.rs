//! Session provider error types.

use sleuth_browser::BrowserError;
use thiserror::Error;

/// Errors raised while setting up a credential's session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Failed to persist session state
    #[error("failed to write session state to {path}: {source}")]
    Store {
        /// Target file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The platform login routine failed
    #[error("login failed for {credential}: {source}")]
    Login {
        /// Identity key of the credential
        credential: String,
        /// Browser-level cause
        #[source]
        source: BrowserError,
    },

    /// The session engine could not create a session
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_display() {
        let err = SessionError::Login {
            credential: "linkedin-analyst".to_string(),
            source: BrowserError::Timeout("selector #global-nav".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "login failed for linkedin-analyst: timeout: selector #global-nav"
        );
    }
}
