//! Sleuth Queries - Search-string generation.
//!
//! Expands investigation records (a company, its products, incident keywords)
//! into keyed sets of search queries. Two groupings are offered:
//!
//! - [`by_incident`]: one query per (company-or-product × keyword), keyed by
//!   the full query string
//! - [`by_subject`]: one entry per company or product name, with the
//!   keywords left for a later stage
//!
//! Both are pure and deterministic. A repeated key replaces the earlier
//! value and keeps its original position.
//!
//! # Example
//!
//! ```rust
//! use sleuth_queries::{by_incident, InvestigationRecord};
//!
//! let records = vec![InvestigationRecord::new("Acme", vec!["Widget"], vec!["leak", "hack"])];
//! let queries = by_incident(&records);
//!
//! assert_eq!(queries.keys(), ["Acme Widget leak", "Acme Widget hack"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod generator;
pub mod record;

pub use error::{QueryError, Result};
pub use generator::{by_incident, by_subject, IncidentQuery, QuerySet, SubjectQuery};
pub use record::{load_records, InvestigationRecord};
