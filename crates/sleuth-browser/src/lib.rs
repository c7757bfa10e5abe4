//! Browser sessions for authenticated platform searches.
//!
//! Provides the session engine abstraction the session provider works
//! against, a headless Chromium implementation with per-session cookie
//! isolation and fingerprint randomization, and random action pacing.

pub mod actions;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod pacing;
pub mod session;

pub use actions::BrowserActions;
pub use engine::ChromiumEngine;
pub use error::{BrowserError, Result};
pub use pacing::{random_delay, Pacer};
pub use session::{BrowserSession, ChromiumSession, SessionEngine, SessionState};
