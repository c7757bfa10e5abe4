//! Session handles and the engine interface that creates them.

use crate::actions::{extract_domain, BrowserActions};
use crate::error::{BrowserError, Result};
use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::network::{Cookie, CookieParam};
use chromiumoxide::cdp::browser_protocol::storage::{GetCookiesParams, SetCookiesParams};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Serialized authenticated state (cookies) of one session.
///
/// Opaque to everything but the engine that produced it; stored and read
/// back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState(String);

impl SessionState {
    /// Wrap a serialized state string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Whether there is no prior state to seed a session with.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Raw serialized form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A live session: page actions plus state export.
#[async_trait]
pub trait BrowserSession: BrowserActions + Send + Sync {
    /// Serialize the session's current authenticated state.
    async fn storage_state(&self) -> Result<SessionState>;
}

/// Factory for sessions, bare or seeded with previously stored state.
#[async_trait]
pub trait SessionEngine: Send + Sync {
    /// Session type this engine hands out.
    type Session: BrowserSession;

    /// Create a new session, seeded with `state` when given.
    async fn new_session(&self, state: Option<&SessionState>) -> Result<Self::Session>;
}

#[derive(Serialize)]
struct StoredCookies<'a> {
    cookies: &'a [Cookie],
}

/// Exported cookie fields that `Storage.setCookies` accepts back.
const SEED_FIELDS: [&str; 9] = [
    "name", "value", "url", "domain", "path", "secure", "httpOnly", "sameSite", "expires",
];

/// Parse stored state into cookies a fresh context can be seeded with.
///
/// Session cookies are exported with `expires: -1`; their expiry is dropped
/// so they are seeded as session cookies again instead of as expired ones.
pub(crate) fn seed_cookies(state: &SessionState) -> Result<Vec<CookieParam>> {
    let root: Value = serde_json::from_str(state.as_str()).map_err(invalid_state)?;

    let Some(stored) = root.get("cookies") else {
        return Ok(Vec::new());
    };
    let stored = stored
        .as_array()
        .ok_or_else(|| BrowserError::InvalidState("cookies is not an array".to_string()))?;

    stored.iter().map(seed_cookie).collect()
}

fn seed_cookie(stored: &Value) -> Result<CookieParam> {
    let fields = stored
        .as_object()
        .ok_or_else(|| BrowserError::InvalidState("cookie is not an object".to_string()))?;

    let session_only = fields.get("session").and_then(Value::as_bool) == Some(true)
        || fields
            .get("expires")
            .and_then(Value::as_f64)
            .is_some_and(|expires| expires < 0.0);

    let seed: Map<String, Value> = fields
        .iter()
        .filter(|(name, _)| SEED_FIELDS.contains(&name.as_str()))
        .filter(|(name, _)| !(session_only && name.as_str() == "expires"))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    serde_json::from_value(Value::Object(seed)).map_err(invalid_state)
}

/// `Storage.setCookies` call placing `cookies` into one browser context.
pub(crate) fn seed_command(
    cookies: Vec<CookieParam>,
    context_id: &BrowserContextId,
) -> Option<SetCookiesParams> {
    if cookies.is_empty() {
        return None;
    }
    Some(SetCookiesParams {
        cookies,
        browser_context_id: Some(context_id.clone()),
    })
}

fn invalid_state(e: serde_json::Error) -> BrowserError {
    BrowserError::InvalidState(e.to_string())
}

/// Chromium tab living in its own browser context.
pub struct ChromiumSession {
    page: Page,
    browser: Arc<Mutex<Browser>>,
    context_id: BrowserContextId,
    navigation_timeout: Duration,
}

impl ChromiumSession {
    pub(crate) fn new(
        page: Page,
        browser: Arc<Mutex<Browser>>,
        context_id: BrowserContextId,
        navigation_timeout: Duration,
    ) -> Self {
        Self {
            page,
            browser,
            context_id,
            navigation_timeout,
        }
    }

    /// Underlying page, for callers that need raw CDP access.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }
}

#[async_trait]
impl BrowserActions for ChromiumSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        let domain = extract_domain(url)?;
        debug!(domain = %domain, "navigating");

        tokio::time::timeout(self.navigation_timeout, async {
            self.page
                .goto(url)
                .await
                .map_err(|e| BrowserError::NavigationError(e.to_string()))?;
            self.page
                .wait_for_navigation()
                .await
                .map_err(|e| BrowserError::NavigationError(e.to_string()))?;
            Ok::<(), BrowserError>(())
        })
        .await
        .map_err(|_| BrowserError::Timeout(format!("navigation to {url}")))?
    }

    async fn fill_field(&self, selector: &str, value: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        element.click().await?;
        element.type_str(value).await?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        element.click().await?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(BrowserError::Timeout(format!(
                    "selector {selector} after {timeout_ms}ms"
                )));
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
    }

    async fn extract_text(&self, selector: &str) -> Result<String> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        Ok(element.inner_text().await?.unwrap_or_default())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        let bytes = self
            .page
            .screenshot(ScreenshotParams::builder().full_page(true).build())
            .await?;
        Ok(bytes)
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn storage_state(&self) -> Result<SessionState> {
        let params = GetCookiesParams {
            browser_context_id: Some(self.context_id.clone()),
        };
        let response = self.browser.lock().await.execute(params).await?;

        let raw = serde_json::to_string(&StoredCookies {
            cookies: &response.result.cookies,
        })
        .map_err(invalid_state)?;
        Ok(SessionState::new(raw))
    }
}
