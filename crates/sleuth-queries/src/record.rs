//! Investigation records and their JSON loading.

use crate::error::{QueryError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// One thing to investigate: a company, its products and incident keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationRecord {
    /// Company name
    pub company_name: String,
    /// Product names; may be empty
    #[serde(default)]
    pub product_names: Vec<String>,
    /// Keywords combined with the company or product names
    pub incident_keywords: Vec<String>,
    /// Opaque options passed through to whoever executes the search
    #[serde(default)]
    pub search_options: Value,
}

impl InvestigationRecord {
    /// Create a record with no search options.
    pub fn new<P, K>(
        company_name: impl Into<String>,
        product_names: P,
        incident_keywords: K,
    ) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self {
            company_name: company_name.into(),
            product_names: product_names.into_iter().map(Into::into).collect(),
            incident_keywords: incident_keywords.into_iter().map(Into::into).collect(),
            search_options: Value::Null,
        }
    }

    /// Attach pass-through search options.
    #[must_use]
    pub fn with_search_options(mut self, search_options: Value) -> Self {
        self.search_options = search_options;
        self
    }

    fn validate(&self, index: usize) -> Result<()> {
        if self.company_name.trim().is_empty() {
            return Err(QueryError::InvalidRecord {
                index,
                reason: "company name cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Load investigation records from a JSON array file.
///
/// Records keep file order, which decides query order and collision winners.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<InvestigationRecord>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| QueryError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let records: Vec<InvestigationRecord> =
        serde_json::from_str(&contents).map_err(|source| QueryError::Parse {
            path: path.display().to_string(),
            source,
        })?;

    for (index, record) in records.iter().enumerate() {
        record.validate(index)?;
    }

    info!(count = records.len(), path = %path.display(), "loaded investigation records");

    Ok(records)
}
