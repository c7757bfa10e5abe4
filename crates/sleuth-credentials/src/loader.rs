//! Credential loading from TOML files.
//!
//! The credentials file holds an array of tables:
//!
//! ```toml
//! [[credentials]]
//! platform = "linkedin"
//! username = "analyst@example.com"
//! password = "..."
//! ```

use crate::{
    credential::Credential,
    error::{CredentialError, Result},
};
use serde::Deserialize;
use sleuth_core::AppConfig;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    #[serde(default)]
    credentials: Vec<Credential>,
}

/// Loader for credentials from a TOML file.
pub struct CredentialLoader {
    path: PathBuf,
}

impl CredentialLoader {
    /// Create a new loader for the given file.
    ///
    /// # Errors
    /// Returns error if the file doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.is_file() {
            return Err(CredentialError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        Ok(Self { path })
    }

    /// Create a loader for `credentials.toml` next to the config file.
    pub fn with_default_path() -> Result<Self> {
        let config_path = AppConfig::config_path()?;
        let path = config_path
            .parent()
            .map_or_else(|| PathBuf::from("credentials.toml"), |dir| dir.join("credentials.toml"));
        Self::new(path)
    }

    /// Path of the credentials file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all credentials in file order.
    ///
    /// Credentials without a username are logged as warnings and skipped.
    /// An empty password is kept.
    ///
    /// # Errors
    /// Returns error if the file can't be read or isn't valid TOML.
    pub fn load_all(&self) -> Result<Vec<Credential>> {
        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| CredentialError::LoadError {
                path: self.path.display().to_string(),
                source: Box::new(e),
            })?;

        let file: CredentialsFile =
            toml::from_str(&contents).map_err(|e| CredentialError::ParseError {
                path: self.path.display().to_string(),
                source: e,
            })?;

        let mut credentials = Vec::with_capacity(file.credentials.len());
        for credential in file.credentials {
            if let Err(e) = credential.validate() {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "skipping invalid credential"
                );
                continue;
            }
            credentials.push(credential);
        }

        info!(
            count = credentials.len(),
            path = %self.path.display(),
            "loaded credentials"
        );

        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleuth_core::Platform;
    use tempfile::TempDir;

    fn write_credentials(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("credentials.toml");
        std::fs::write(&path, content).expect("write credentials file");
        path
    }

    #[test]
    fn test_loader_new_with_missing_file() {
        let loader = CredentialLoader::new("/nonexistent/credentials.toml");
        assert!(matches!(
            loader,
            Err(CredentialError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_load_all_preserves_order() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = write_credentials(
            temp_dir.path(),
            r#"
[[credentials]]
platform = "twitter"
username = "second"
password = "pw"

[[credentials]]
platform = "linkedin"
username = "first@example.com"
password = "pw"

[[credentials]]
platform = "mastodon"
username = "third"
password = "pw"
"#,
        );

        let loader = CredentialLoader::new(&path).expect("create loader");
        let credentials = loader.load_all().expect("load credentials");

        let usernames: Vec<&str> = credentials.iter().map(|c| c.username.as_str()).collect();
        assert_eq!(usernames, vec!["second", "first@example.com", "third"]);
        assert_eq!(credentials[0].platform, Platform::Twitter);
        assert_eq!(
            credentials[2].platform,
            Platform::Other("mastodon".to_string())
        );
    }

    #[test]
    fn test_load_all_skips_invalid() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = write_credentials(
            temp_dir.path(),
            r#"
[[credentials]]
platform = "reddit"
username = ""
password = "pw"

[[credentials]]
platform = "reddit"
username = "valid"
password = "pw"
"#,
        );

        let loader = CredentialLoader::new(&path).expect("create loader");
        let credentials = loader.load_all().expect("load credentials");
        assert_eq!(credentials.len(), 1);
        assert_eq!(credentials[0].username, "valid");
    }

    #[test]
    fn test_load_all_keeps_empty_password() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = write_credentials(
            temp_dir.path(),
            r#"
[[credentials]]
platform = "linkedin"
username = "session-only"
password = ""

[[credentials]]
platform = "linkedin"
username = "with-password"
password = "pw"
"#,
        );

        let loader = CredentialLoader::new(&path).expect("create loader");
        let credentials = loader.load_all().expect("load credentials");

        let usernames: Vec<&str> = credentials.iter().map(|c| c.username.as_str()).collect();
        assert_eq!(usernames, vec!["session-only", "with-password"]);
    }

    #[test]
    fn test_load_all_invalid_toml() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = write_credentials(temp_dir.path(), "invalid toml content [[[");

        let loader = CredentialLoader::new(&path).expect("create loader");
        assert!(matches!(
            loader.load_all(),
            Err(CredentialError::ParseError { .. })
        ));
    }

    #[test]
    fn test_load_all_empty_file() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = write_credentials(temp_dir.path(), "");

        let loader = CredentialLoader::new(&path).expect("create loader");
        assert!(loader.load_all().expect("load credentials").is_empty());
    }
}
