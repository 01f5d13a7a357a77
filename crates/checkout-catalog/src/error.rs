//! # Catalog Error Types
//!
//! Error types for reading catalog sources.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds the path and categorization         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  loader::load ← SourceUnavailable → try fallback                       │
//! │                 InvalidJson / NotAnArray → empty catalog + diagnostic  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The loader never returns these to its caller; it folds them into
//! diagnostics. They surface directly only from [`crate::source`].

use thiserror::Error;

/// Catalog source errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The source could not be read.
    ///
    /// ## When This Occurs
    /// - File does not exist
    /// - Permission denied
    /// - Path is a directory
    #[error("Cannot read catalog source {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The source is not valid JSON.
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The source is valid JSON but not an array of records.
    #[error("expected an array of product records, found {found}")]
    NotAnArray { found: &'static str },
}

impl CatalogError {
    /// Creates a SourceUnavailable error for a path.
    pub fn unavailable(path: impl Into<String>, source: std::io::Error) -> Self {
        CatalogError::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// True when the source could not be read at all, as opposed to being
    /// read and found malformed.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CatalogError::SourceUnavailable { .. })
    }
}

/// Result type for catalog source operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
