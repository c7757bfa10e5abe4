//! Sleuth Credentials - Account registry for authenticated searching.
//!
//! This crate holds the ordered list of platform accounts the dispatcher
//! spreads work across. It handles loading credentials from a TOML file,
//! validating them, and grouping them by platform.
//!
//! # Architecture
//!
//! - **Credential** ([`credential`]): one account on one platform
//! - **Loader** ([`loader`]): TOML file loading (`[[credentials]]` tables)
//! - **Registry** ([`registry`]): ordered list with grouping and key lookups
//! - **Errors** ([`error`]): credential-specific error types
//!
//! # Example
//!
//! ```rust
//! use sleuth_credentials::{Credential, CredentialRegistry};
//! use sleuth_core::Platform;
//!
//! let registry = CredentialRegistry::new(vec![
//!     Credential::new(Platform::LinkedIn, "a@example.com", "secret"),
//!     Credential::new(Platform::Twitter, "acme_watch", "secret"),
//! ]);
//!
//! assert_eq!(registry.len(), 2);
//! assert_eq!(registry.by_platform().len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod credential;
pub mod error;
pub mod loader;
pub mod registry;

// Re-export commonly used types
pub use credential::Credential;
pub use error::{CredentialError, Result};
pub use loader::CredentialLoader;
pub use registry::{CredentialRegistry, PlatformGroup};
