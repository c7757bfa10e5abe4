//! Page actions shared by login routines and search loops.

use crate::error::{BrowserError, Result};

/// Page interactions a login routine or search loop drives.
///
/// Login routines use the form actions (`fill_field`, `click`,
/// `wait_for_selector`); search loops mostly `navigate` and read results back
/// with `extract_text`.
#[async_trait::async_trait]
pub trait BrowserActions {
    /// Load `url` and wait for the navigation to settle.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Type `value` into the input matched by `selector`.
    async fn fill_field(&self, selector: &str, value: &str) -> Result<()>;

    /// Click the element matched by `selector`.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Wait up to `timeout_ms` for `selector` to match, e.g. a post-login landmark.
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()>;

    /// Inner text of the element matched by `selector`.
    async fn extract_text(&self, selector: &str) -> Result<String>;

    /// PNG of the full page.
    async fn screenshot(&self) -> Result<Vec<u8>>;
}

/// Host part of a login or search URL, for tagging navigation logs.
pub fn extract_domain(url: &str) -> Result<String> {
    let parsed = url::Url::parse(url)
        .map_err(|e| BrowserError::NavigationError(format!("invalid url {url}: {e}")))?;

    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| BrowserError::NavigationError(format!("no host in {url}")))
}
