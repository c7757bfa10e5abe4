//! Configuration management for Sleuth.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Platform;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/sleuth/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Action pacing settings
    pub pacing: PacingConfig,
    /// Session storage settings
    pub sessions: SessionsConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Form login selectors, keyed by lowercase platform name
    pub logins: BTreeMap<String, LoginForm>,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults
    /// if not found.
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, falling back to defaults if
    /// the file does not exist.
    pub fn load_from(config_path: &Path) -> ConfigResult<Self> {
        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SLEUTH_HEADLESS`: Override browser headless mode (true/false)
    /// - `SLEUTH_MAX_DELAY_MS`: Override the default maximum pacing delay
    /// - `SLEUTH_SESSION_DIR`: Override the session storage directory
    pub fn load_with_env(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        if let Ok(val) = std::env::var("SLEUTH_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Ok(val) = std::env::var("SLEUTH_MAX_DELAY_MS") {
            let max_delay_ms = val.parse().map_err(|_| ConfigError::InvalidValue {
                field: "SLEUTH_MAX_DELAY_MS".to_string(),
                reason: format!("expected an unsigned integer, got '{val}'"),
            })?;
            self.pacing.max_delay_ms = max_delay_ms;
            tracing::debug!("Override pacing.max_delay_ms from env: {}", max_delay_ms);
        }

        if let Ok(val) = std::env::var("SLEUTH_SESSION_DIR") {
            tracing::debug!("Override sessions.dir from env: {}", val);
            self.sessions.dir = Some(PathBuf::from(val));
        }

        Ok(())
    }

    /// Save configuration to the given path.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, config_path: &Path) -> ConfigResult<()> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Form login selectors configured for a platform, if any.
    #[must_use]
    pub fn login_for(&self, platform: &Platform) -> Option<&LoginForm> {
        self.logins.get(platform.as_str())
    }

    /// Directory holding persisted session state files.
    ///
    /// Uses `sessions.dir` if set, else `<data dir>/sessions`.
    pub fn session_dir(&self) -> ConfigResult<PathBuf> {
        match &self.sessions.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::data_dir()?.join("sessions")),
        }
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/sleuth/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "sleuth", "sleuth").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/sleuth`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "sleuth", "sleuth").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

/// Action pacing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Exclusive upper bound of random delays between actions, in milliseconds
    pub max_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self { max_delay_ms: 3000 }
    }
}

/// Session storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    /// Directory for `storageStateFor[...]` files (defaults to the data dir)
    pub dir: Option<PathBuf>,
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            navigation_timeout_secs: 30,
        }
    }
}

/// Selectors driving an interactive username/password login form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    /// Login page URL
    pub url: String,
    /// CSS selector of the username input
    pub username_selector: String,
    /// CSS selector of the password input
    pub password_selector: String,
    /// CSS selector of the submit button
    pub submit_selector: String,
    /// CSS selector that appears once the login succeeded
    #[serde(default)]
    pub success_selector: Option<String>,
    /// How long to wait for the success selector, in milliseconds
    #[serde(default = "default_login_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_login_timeout_ms() -> u64 {
    30_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.pacing.max_delay_ms, 3000);
        assert!(config.sessions.dir.is_none());
        assert!(config.browser.headless);
        assert!(config.logins.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[pacing]"));
        assert!(toml_str.contains("[browser]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.pacing.max_delay_ms, config.pacing.max_delay_ms);
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.pacing.max_delay_ms = 750;
        config.sessions.dir = Some(tmp.path().join("sessions"));

        config.save_to(&config_path).expect("save config");
        let loaded = AppConfig::load_from(&config_path).expect("load config");

        assert_eq!(loaded.pacing.max_delay_ms, 750);
        assert_eq!(
            loaded.session_dir().expect("session dir"),
            tmp.path().join("sessions")
        );
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let tmp = TempDir::new().expect("create temp dir");
        let config = AppConfig::load_from(&tmp.path().join("absent.toml")).expect("load");
        assert_eq!(config.pacing.max_delay_ms, 3000);
    }

    #[test]
    fn test_partial_config_with_logins() {
        let toml_str = r##"
[pacing]
max_delay_ms = 1200

[logins.linkedin]
url = "https://www.linkedin.com/login"
username_selector = "#username"
password_selector = "#password"
submit_selector = "button[type='submit']"
success_selector = "#global-nav"
"##;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.pacing.max_delay_ms, 1200);
        assert!(config.browser.headless);

        let form = config
            .login_for(&Platform::LinkedIn)
            .expect("linkedin login form");
        assert_eq!(form.username_selector, "#username");
        assert_eq!(form.timeout_ms, 30_000);
        assert!(config.login_for(&Platform::Reddit).is_none());
    }
}
