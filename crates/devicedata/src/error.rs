//! Error types for the devicedata library.
//!
//! Problems found inside a record are not Rust errors: they are collected as
//! [`ContextError`](crate::context::ContextError) values. `DataError` covers
//! the operations that fail fast, such as binding a deduplicator to a dataset.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for devicedata operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// The deduplicator descriptor is already bound to a named deduplicator.
    #[error("deduplicator descriptor already registered with \"{name}\"")]
    AlreadyRegistered { name: String },

    /// The descriptor carries a version but no name.
    #[error("deduplicator descriptor already registered with unknown deduplicator")]
    AlreadyRegisteredWithUnknown,

    /// The dataset has no deduplicator bound to it yet.
    #[error("dataset not registered with deduplicator")]
    NotRegistered,

    /// No registered factory accepts the dataset.
    #[error("deduplicator not found")]
    DeduplicatorNotFound,

    /// A delegate factory was built without any factories.
    #[error("factories is missing")]
    FactoriesMissing,

    /// The dataset does not exist in the store.
    #[error("dataset '{upload_id}' not found")]
    DatasetNotFound { upload_id: String },

    /// The dataset was deleted; no further data may be added to it.
    #[error("dataset '{upload_id}' is deleted")]
    DatasetDeleted { upload_id: String },

    /// A record lacks a field needed to compute its identity hash.
    #[error("identity field '{field}' is missing")]
    IdentityIncomplete { field: &'static str },

    /// Failure reported by the storage collaborator.
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for devicedata operations.
pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_registered_message_quotes_name() {
        let err = DataError::AlreadyRegistered {
            name: "org.tidepool.truncate".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "deduplicator descriptor already registered with \"org.tidepool.truncate\""
        );
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DataError = json_err.into();
        assert!(matches!(err, DataError::Json(_)));
    }
}
