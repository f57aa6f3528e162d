//! Error types for loading and integration.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or integrating the datasets.
#[derive(Debug, Error)]
pub enum DataError {
    /// One or more expected source files are absent. The whole load fails;
    /// there is no partial-success mode.
    #[error("missing source file(s) in {}: {}", .dir.display(), .files.join(", "))]
    MissingSource {
        /// Directory that was scanned.
        dir: PathBuf,
        /// Expected filenames that were not found.
        files: Vec<String>,
    },

    /// A required column is absent from a source table's header row.
    #[error("table '{table}' is missing required column '{column}'")]
    MissingColumn {
        /// Logical name of the source table.
        table: &'static str,
        /// The missing column.
        column: String,
    },

    /// A dimension table holds the same key twice. The load is rejected
    /// rather than letting the join fan fact rows out.
    #[error("table '{table}' has duplicate {column} '{key}'")]
    DuplicateKey {
        /// Logical name of the dimension table.
        table: &'static str,
        /// The key column.
        column: &'static str,
        /// The duplicated value.
        key: String,
    },

    /// A date cell could not be parsed. Aborts the integration.
    #[error("table '{table}' row {row}: unparsable date '{value}'")]
    UnparsableDate {
        /// Logical name of the source table.
        table: &'static str,
        /// Zero-based data row index.
        row: usize,
        /// The offending cell value.
        value: String,
    },

    /// A numeric cell could not be coerced under
    /// [`CoercePolicy::CoerceOrFail`](crate::CoercePolicy::CoerceOrFail).
    #[error("table '{table}' row {row}: non-numeric {column} '{value}'")]
    MalformedNumber {
        /// Logical name of the source table.
        table: &'static str,
        /// The numeric column.
        column: String,
        /// Zero-based data row index.
        row: usize,
        /// The offending cell value.
        value: String,
    },

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
