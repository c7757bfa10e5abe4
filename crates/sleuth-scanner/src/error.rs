use sleuth_core::CredentialKey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Credential error: {0}")]
    Credentials(#[from] sleuth_credentials::CredentialError),

    #[error("Query error: {0}")]
    Queries(#[from] sleuth_queries::QueryError),

    #[error("Session error: {0}")]
    Session(#[from] sleuth_session::SessionError),

    #[error("No session for credential {credential}")]
    MissingSession { credential: CredentialKey },
}

pub type Result<T> = std::result::Result<T, ScanError>;
