//! Credential type.

use crate::error::{CredentialError, Result};
use serde::{Deserialize, Serialize};
use sleuth_core::{CredentialKey, Platform};
use std::fmt;

/// A platform account used to obtain an authenticated session.
///
/// Immutable once loaded. `Debug` output redacts the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Platform the account belongs to
    pub platform: Platform,
    /// Account username (email or handle)
    pub username: String,
    /// Account password
    pub password: String,
}

impl Credential {
    /// Create a credential.
    #[must_use]
    pub fn new(
        platform: Platform,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Identity key `"<platform>-<username>"`.
    #[must_use]
    pub fn key(&self) -> CredentialKey {
        CredentialKey::new(&self.platform, &self.username)
    }

    /// Check the credential has a usable identity key.
    ///
    /// The password is not checked: an account may rely on a stored session.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(CredentialError::ValidationError {
                key: self.key().to_string(),
                reason: "username cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("platform", &self.platform)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
