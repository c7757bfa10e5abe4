//! Directory-backed session state storage.

use crate::error::{Result, SessionError};
use sleuth_browser::SessionState;
use sleuth_credentials::Credential;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Deterministic file name of a credential's persisted session:
/// `storageStateFor[<platform>][<username>].json`.
#[must_use]
pub fn storage_name(credential: &Credential) -> String {
    format!(
        "storageStateFor[{}][{}].json",
        credential.platform, credential.username
    )
}

/// Session state files kept in one directory, one per credential.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Store rooted at `dir`; the directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of the store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a credential's state file.
    #[must_use]
    pub fn path_for(&self, credential: &Credential) -> PathBuf {
        self.dir.join(storage_name(credential))
    }

    /// Read a credential's persisted state verbatim.
    ///
    /// A missing file surfaces as `io::ErrorKind::NotFound`.
    pub async fn read(&self, credential: &Credential) -> std::io::Result<SessionState> {
        let raw = tokio::fs::read_to_string(self.path_for(credential)).await?;
        Ok(SessionState::new(raw))
    }

    /// Persist a credential's state verbatim, replacing any previous file.
    pub async fn write(&self, credential: &Credential, state: &SessionState) -> Result<()> {
        let path = self.path_for(credential);
        let store_err = |source| SessionError::Store {
            path: path.display().to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.dir).await.map_err(store_err)?;
        tokio::fs::write(&path, state.as_str())
            .await
            .map_err(store_err)?;

        debug!(path = %path.display(), "wrote session state");
        Ok(())
    }
}
