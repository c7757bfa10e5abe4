//! Platform login routines.

use async_trait::async_trait;
use sleuth_browser::{BrowserSession, Pacer, Result, SessionState};
use sleuth_core::{AppConfig, LoginForm, Platform};
use sleuth_credentials::Credential;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Interactive login for one platform.
///
/// Drives `session` through the platform's authentication flow and returns
/// the resulting state. Errors are fatal for that credential's setup.
#[async_trait]
pub trait PlatformLogin<S: BrowserSession>: Send + Sync {
    /// Log `credential` in on `session` and serialize the authenticated state.
    async fn login(&self, credential: &Credential, session: &S) -> Result<SessionState>;
}

/// Username/password form login described entirely by selectors.
#[derive(Debug, Clone)]
pub struct FormLogin {
    form: LoginForm,
    pacer: Pacer,
}

impl FormLogin {
    /// Create a form login that pauses between steps using `pacer`.
    #[must_use]
    pub fn new(form: LoginForm, pacer: Pacer) -> Self {
        Self { form, pacer }
    }
}

#[async_trait]
impl<S: BrowserSession> PlatformLogin<S> for FormLogin {
    async fn login(&self, credential: &Credential, session: &S) -> Result<SessionState> {
        debug!(credential = %credential.key(), url = %self.form.url, "starting form login");

        session.navigate(&self.form.url).await?;
        self.pacer.pause().await;

        session
            .fill_field(&self.form.username_selector, &credential.username)
            .await?;
        self.pacer.pause().await;

        session
            .fill_field(&self.form.password_selector, &credential.password)
            .await?;
        self.pacer.pause().await;

        session.click(&self.form.submit_selector).await?;

        if let Some(success) = &self.form.success_selector {
            session
                .wait_for_selector(success, self.form.timeout_ms)
                .await?;
        }

        session.storage_state().await
    }
}

/// Login routines keyed by platform.
pub struct LoginRoutines<S: BrowserSession> {
    routines: HashMap<Platform, Arc<dyn PlatformLogin<S>>>,
}

impl<S: BrowserSession> LoginRoutines<S> {
    /// Empty set: every platform gets a bare session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            routines: HashMap::new(),
        }
    }

    /// Form logins for every `[logins.<platform>]` table in the config.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let pacer = Pacer::from(&config.pacing);
        let mut routines = Self::new();

        for (name, form) in &config.logins {
            match name.parse::<Platform>() {
                Ok(platform) => {
                    routines.register(platform, FormLogin::new(form.clone(), pacer));
                }
                Err(e) => warn!(platform = %name, error = %e, "ignoring login form"),
            }
        }

        routines
    }

    /// Register (or replace) the routine for a platform.
    pub fn register(&mut self, platform: Platform, routine: impl PlatformLogin<S> + 'static) {
        self.routines.insert(platform, Arc::new(routine));
    }

    /// Routine for a platform, if one is registered.
    #[must_use]
    pub fn get(&self, platform: &Platform) -> Option<Arc<dyn PlatformLogin<S>>> {
        self.routines.get(platform).cloned()
    }

    /// Number of registered routines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routines.len()
    }

    /// Whether no routine is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }
}

impl<S: BrowserSession> Default for LoginRoutines<S> {
    fn default() -> Self {
        Self::new()
    }
}
