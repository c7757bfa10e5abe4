//! Sleuth Scanner - Work partitioning and dispatch.
//!
//! Splits generated query keys across the credentials of each platform and
//! coordinates session setup with the search loop that works through each
//! credential's share.
//!
//! # Features
//!
//! - Contiguous, per-platform partitioning of query keys
//! - Fail-fast or settled session setup before dispatch
//! - Concurrent execution of shares with configurable parallelism
//! - Random pacing between queries within a share
//!
//! # Example
//!
//! ```rust
//! use sleuth_core::{CredentialKey, Platform};
//! use sleuth_credentials::{Credential, CredentialRegistry};
//! use sleuth_scanner::partition;
//!
//! let registry = CredentialRegistry::new(vec![
//!     Credential::new(Platform::LinkedIn, "a", "pw"),
//!     Credential::new(Platform::LinkedIn, "b", "pw"),
//! ]);
//! let keys: Vec<String> = (1..=5).map(|i| format!("q{i}")).collect();
//!
//! let assignment = partition(&keys, &registry);
//! let share_len = |user: &str| {
//!     assignment
//!         .get(&CredentialKey::new(&Platform::LinkedIn, user))
//!         .map(Vec::len)
//! };
//! assert_eq!(share_len("a"), Some(3));
//! assert_eq!(share_len("b"), Some(2));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod error;
pub mod orchestrator;
pub mod partition;

// Re-export commonly used types
pub use error::{Result, ScanError};
pub use orchestrator::{
    load_inputs, query_keys, AssignmentOutcome, DispatchPlan, Dispatcher, Grouping, SearchTask,
};
pub use partition::{chunk_size, partition, partition_group, PartitionAssignment};
