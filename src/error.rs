//! Error types for the query engine.
//!
//! Every failure the engine can report is a [`VitrineError`]. Data-shape
//! mismatches (a product missing an attribute, a numeric predicate against a
//! text value) are not errors: they are non-matches.

use thiserror::Error;

/// The error type used throughout the crate.
#[derive(Debug, Error)]
pub enum VitrineError {
    /// Two input records share the same product id.
    #[error("Duplicate product id: {0}")]
    DuplicateId(String),

    /// A search query that tokenizes to nothing.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A structurally malformed filter predicate.
    #[error("Invalid predicate: {0}")]
    InvalidPredicate(String),

    /// A product id that is not in the catalog.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid engine configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON decoding failure (loader and config documents).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure while reading raw records.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VitrineError {
    pub fn duplicate_id<S: Into<String>>(id: S) -> Self {
        VitrineError::DuplicateId(id.into())
    }

    pub fn invalid_query<S: Into<String>>(msg: S) -> Self {
        VitrineError::InvalidQuery(msg.into())
    }

    pub fn invalid_predicate<S: Into<String>>(msg: S) -> Self {
        VitrineError::InvalidPredicate(msg.into())
    }

    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        VitrineError::NotFound(msg.into())
    }

    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        VitrineError::InvalidConfig(msg.into())
    }
}

/// Result alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, VitrineError>;
