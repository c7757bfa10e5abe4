//! Sleuth Session - Authenticated session acquisition per credential.
//!
//! For every credential the provider either reuses a persisted session
//! state file or logs in through the platform's login routine and persists
//! the fresh state. Setups for different credentials run concurrently.
//!
//! # Modules
//!
//! - [`store`] - Directory-backed session state files
//! - [`login`] - Login routine interface and the selector-driven form login
//! - [`provider`] - The session provider and its batch operations
//!
//! Persisted state is reused as-is: nothing checks that a stored session is
//! still accepted by the platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod login;
pub mod provider;
pub mod store;

pub use error::{Result, SessionError};
pub use login::{FormLogin, LoginRoutines, PlatformLogin};
pub use provider::{CredentialSessions, SessionProvider};
pub use store::{storage_name, SessionStore};
