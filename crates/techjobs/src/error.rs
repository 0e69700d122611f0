//! Error types for techjobs operations.
//!
//! Errors fall into two groups:
//!
//! - **`LoadError`**: the data source could not be turned into a dataset
//!   (missing file, unreadable stream, malformed table). A failed load leaves
//!   the store unloaded; nothing is partially published.
//! - **`Error::FieldNotFound`**: a query named a column that is not in the
//!   header. This is always an error, never an empty result.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for techjobs operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for techjobs operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The dataset could not be loaded from its source.
    #[error("failed to load job data: {0}")]
    Load(#[from] LoadError),

    /// A query referenced a column name that is not part of the header.
    #[error("unknown field '{field}'")]
    FieldNotFound {
        /// The field name exactly as the caller passed it
        field: String,
    },

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// File system operation failed outside of loading (e.g. reading a config file)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization of query results failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a `FieldNotFound` error for the given field name.
    #[must_use]
    pub fn field_not_found(field: impl Into<String>) -> Self {
        Self::FieldNotFound {
            field: field.into(),
        }
    }

    /// Returns `true` if this error reports an unknown field.
    #[must_use]
    pub fn is_field_not_found(&self) -> bool {
        matches!(self, Self::FieldNotFound { .. })
    }

    /// Returns `true` if this error comes from loading the dataset.
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Load(_))
    }
}

/// Failure to turn a data source into a dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The source stream failed while being read.
    #[error("cannot read source: {0}")]
    Read(#[source] io::Error),

    /// The content is not valid delimited text.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The source contains no header row.
    #[error("source has no header row")]
    MissingHeader,

    /// The header names the same column more than once.
    #[error("duplicate column '{0}' in header")]
    DuplicateColumn(String),

    /// A data row has a different number of cells than the header.
    #[error("row at line {line} has {found} fields, expected {expected}")]
    RowLength {
        /// 1-based line on which the offending row (or blank line) starts
        line: u64,
        /// Number of columns in the header
        expected: usize,
        /// Number of cells in the row
        found: usize,
    },
}
