use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

/// Errors raised while loading investigation records.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Records file could not be read
    #[error("failed to read records from {path}: {source}")]
    Io {
        /// Path to the records file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Records file is not valid JSON for the record schema
    #[error("failed to parse records in {path}: {source}")]
    Parse {
        /// Path to the records file
        path: String,
        /// JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A record failed validation
    #[error("invalid record #{index}: {reason}")]
    InvalidRecord {
        /// Zero-based position in the file
        index: usize,
        /// Reason for validation failure
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::InvalidRecord {
            index: 2,
            reason: "company name cannot be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid record #2: company name cannot be empty"
        );
    }
}
