//! Session provider: one authenticated session per credential.

use crate::error::{Result, SessionError};
use crate::login::LoginRoutines;
use crate::store::SessionStore;
use futures::future::{join_all, try_join_all};
use sleuth_browser::{SessionEngine, SessionState};
use sleuth_core::CredentialKey;
use sleuth_credentials::{Credential, CredentialRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Sessions keyed by credential identity key.
pub type CredentialSessions<S> = HashMap<CredentialKey, S>;

/// Obtains sessions for credentials, reusing stored state when present.
pub struct SessionProvider<E: SessionEngine> {
    engine: Arc<E>,
    store: SessionStore,
    logins: LoginRoutines<E::Session>,
}

impl<E: SessionEngine> SessionProvider<E> {
    /// Create a provider over an engine, a state store and login routines.
    pub fn new(engine: Arc<E>, store: SessionStore, logins: LoginRoutines<E::Session>) -> Self {
        Self {
            engine,
            store,
            logins,
        }
    }

    /// State store the provider reads from and writes to.
    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Session for one credential.
    ///
    /// Stored non-empty state is reused without checking it is still live.
    /// Otherwise the platform's login routine runs and its state is stored.
    /// Platforms without a routine get a bare session and nothing is stored.
    pub async fn provide(&self, credential: &Credential) -> Result<E::Session> {
        let key = credential.key();
        let path = self.store.path_for(credential);

        let state = match self.store.read(credential).await {
            Ok(state) => state,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    credential = %key,
                    path = %path.display(),
                    "no stored session, starting fresh"
                );
                SessionState::default()
            }
            Err(e) => {
                warn!(
                    credential = %key,
                    path = %path.display(),
                    error = %e,
                    "failed to read stored session, starting fresh"
                );
                SessionState::default()
            }
        };

        if !state.is_empty() {
            info!(credential = %key, "reusing stored session");
            return Ok(self.engine.new_session(Some(&state)).await?);
        }

        let session = self.engine.new_session(None).await?;

        let Some(routine) = self.logins.get(&credential.platform) else {
            warn!(
                credential = %key,
                platform = %credential.platform,
                "no login routine for platform, using unauthenticated session"
            );
            return Ok(session);
        };

        let fresh = routine
            .login(credential, &session)
            .await
            .map_err(|source| SessionError::Login {
                credential: key.to_string(),
                source,
            })?;

        self.store.write(credential, &fresh).await?;
        info!(credential = %key, path = %path.display(), "logged in and stored session");

        Ok(session)
    }

    /// Sessions for every credential, set up concurrently.
    ///
    /// Fails the whole batch on the first setup error. Later credentials
    /// sharing an identity key overwrite earlier ones in the result.
    pub async fn provide_all(
        &self,
        registry: &CredentialRegistry,
    ) -> Result<CredentialSessions<E::Session>> {
        warn_duplicates(registry);

        let sessions = try_join_all(registry.iter().map(|credential| async move {
            let session = self.provide(credential).await?;
            Ok::<_, SessionError>((credential.key(), session))
        }))
        .await?;

        info!(count = sessions.len(), "sessions ready");

        Ok(sessions.into_iter().collect())
    }

    /// Sessions for every credential, keeping each credential's outcome.
    ///
    /// One failed login does not discard the sessions of other credentials.
    pub async fn provide_each(
        &self,
        registry: &CredentialRegistry,
    ) -> HashMap<CredentialKey, Result<E::Session>> {
        warn_duplicates(registry);

        let outcomes = join_all(registry.iter().map(|credential| async move {
            (credential.key(), self.provide(credential).await)
        }))
        .await;

        let failed = outcomes.iter().filter(|(_, r)| r.is_err()).count();
        if failed > 0 {
            warn!(failed, total = outcomes.len(), "some sessions failed to set up");
        }

        outcomes.into_iter().collect()
    }
}

fn warn_duplicates(registry: &CredentialRegistry) {
    for key in registry.duplicate_keys() {
        warn!(credential = %key, "duplicate credential key, later session wins");
    }
}
