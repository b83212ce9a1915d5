//! Error types and result types for document store operations.
//!
//! Saving, searching and looking up documents are total for the in-memory
//! backend, so these errors mostly describe what other backends may report.
//! Use [`DocumentStoreResult<T>`] as the return type for fallible operations.
//! A missing document is never an error; lookups return `None` instead.

use std::convert::Infallible;

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a document store.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// Serialization/deserialization error when converting documents to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The store ran out of identifiers to hand out to new documents.
    #[error("Identifier space exhausted")]
    IdentifiersExhausted,
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<SerdeJsonError> for DocumentStoreError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}

impl From<Infallible> for DocumentStoreError {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_become_serialization_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DocumentStoreError::from(err);

        assert!(matches!(err, DocumentStoreError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error: "));
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            DocumentStoreError::IdentifiersExhausted.to_string(),
            "Identifier space exhausted"
        );
        assert_eq!(
            DocumentStoreError::Backend("down".to_string()).to_string(),
            "Backend error: down"
        );
    }
}
