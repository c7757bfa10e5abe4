use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use crate::session::{seed_command, seed_cookies, ChromiumSession, SessionEngine, SessionState};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromiumConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams,
};
use futures::StreamExt;
use sleuth_core::BrowserConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Headless Chromium engine; every session gets its own browser context so
/// cookies never leak between accounts.
pub struct ChromiumEngine {
    browser: Arc<Mutex<Browser>>,
    fingerprint: Option<FingerprintConfig>,
    navigation_timeout: Duration,
}

impl ChromiumEngine {
    /// Launch Chromium with a randomized fingerprint per session.
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        Self::launch_inner(config, None).await
    }

    /// Launch Chromium with the same fingerprint for every session.
    pub async fn with_fingerprint(
        config: &BrowserConfig,
        fingerprint: FingerprintConfig,
    ) -> Result<Self> {
        Self::launch_inner(config, Some(fingerprint)).await
    }

    async fn launch_inner(
        config: &BrowserConfig,
        fingerprint: Option<FingerprintConfig>,
    ) -> Result<Self> {
        let mut builder = ChromiumConfig::builder()
            .no_sandbox()
            .window_size(config.window_width, config.window_height)
            .request_timeout(Duration::from_secs(config.navigation_timeout_secs));
        if !config.headless {
            builder = builder.with_head();
        }
        let chromium_config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(chromium_config).await?;

        // Spawn browser handler
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        debug!(headless = config.headless, "launched chromium");

        Ok(Self {
            browser: Arc::new(Mutex::new(browser)),
            fingerprint,
            navigation_timeout: Duration::from_secs(config.navigation_timeout_secs),
        })
    }
}

#[async_trait]
impl SessionEngine for ChromiumEngine {
    type Session = ChromiumSession;

    async fn new_session(&self, state: Option<&SessionState>) -> Result<ChromiumSession> {
        let seed = match state {
            Some(state) if !state.is_empty() => seed_cookies(state)?,
            _ => Vec::new(),
        };

        let (page, context_id) = {
            let mut browser = self.browser.lock().await;
            let context_id = browser
                .create_browser_context(CreateBrowserContextParams::default())
                .await?;
            let target = CreateTargetParams::builder()
                .url("about:blank")
                .browser_context_id(context_id.clone())
                .build()
                .map_err(BrowserError::ChromiumError)?;
            let page = browser.new_page(target).await?;

            if let Some(command) = seed_command(seed, &context_id) {
                debug!(
                    cookies = command.cookies.len(),
                    "seeding session with stored cookies"
                );
                browser.execute(command).await?;
            }

            (page, context_id)
        };

        let fingerprint = self
            .fingerprint
            .clone()
            .unwrap_or_else(FingerprintConfig::randomized);
        page.set_user_agent(fingerprint.user_agent).await?;
        page.execute(SetDeviceMetricsOverrideParams::new(
            i64::from(fingerprint.viewport_width),
            i64::from(fingerprint.viewport_height),
            1.0,
            false,
        ))
        .await?;

        Ok(ChromiumSession::new(
            page,
            Arc::clone(&self.browser),
            context_id,
            self.navigation_timeout,
        ))
    }
}
