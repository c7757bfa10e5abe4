//! Sleuth Core - Foundation crate for the Sleuth search dispatcher.
//!
//! This crate provides shared types, error handling and configuration
//! management that all other Sleuth crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes and enums (`Platform`, `CredentialKey`)
//! - [`ordered`] - Insertion-ordered, last-write-wins map
//!
//! # Example
//!
//! ```rust
//! use sleuth_core::{AppConfig, CredentialKey, Platform};
//!
//! let config = AppConfig::default();
//! assert_eq!(config.pacing.max_delay_ms, 3000);
//!
//! let key = CredentialKey::new(&Platform::LinkedIn, "analyst@example.com");
//! assert_eq!(key.as_str(), "linkedin-analyst@example.com");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod ordered;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, LoginForm, PacingConfig, SessionsConfig};
pub use error::{ConfigError, ConfigResult, Result, SleuthError};
pub use ordered::OrderedMap;
pub use types::{CredentialKey, Platform};
