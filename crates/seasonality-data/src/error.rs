//! Error types for data operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or cleaning series data.
#[derive(Debug, Error)]
pub enum DataError {
    /// Source file could not be opened or read
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path of the source file
        path: PathBuf,
        /// Underlying CSV/IO error
        source: csv::Error,
    },

    /// CSV decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Required column is absent
    #[error("Missing column {column} in {path}")]
    MissingColumn {
        /// Path of the source file
        path: PathBuf,
        /// Name of the absent column
        column: String,
    },

    /// Source does not have exactly one value column
    #[error("Expected exactly one value column in {path}, found {found:?}")]
    UnexpectedColumns {
        /// Path of the source file
        path: PathBuf,
        /// Non-date columns that were found
        found: Vec<String>,
    },

    /// A source lists the same observation date twice
    #[error("Duplicate observation date {date} in {path}")]
    DuplicateDate {
        /// Path of the source file
        path: PathBuf,
        /// Repeated date text
        date: String,
    },

    /// Two sources map to the same column name
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Date value could not be parsed
    #[error("Invalid observation date {value:?}: {reason}")]
    DateParse {
        /// Offending value
        value: String,
        /// Parser message
        reason: String,
    },

    /// Value column could not be cast to floating point
    #[error("Column {column} contains non-numeric values: {reason}")]
    NonNumeric {
        /// Column that failed the cast
        column: String,
        /// Cast error message
        reason: String,
    },

    /// Operation requires at least one row
    #[error("Table is empty")]
    EmptyTable,

    /// No sources were supplied
    #[error("No sources to load")]
    NoSources,

    /// Column lookup on a table failed
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}
