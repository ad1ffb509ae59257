//! Dataset error types
//!
//! Defines all errors that can occur while loading or querying datasets.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the dataset layer
#[derive(Error, Debug)]
pub enum DatasetError {
    /// I/O operation failed
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing failed
    #[error("CSV error in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Spreadsheet workbook could not be opened or read
    #[error("Workbook error in {path:?}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// A source produced a table without a header row
    #[error("Dataset '{0}' has no header row")]
    MissingHeader(String),

    /// A required column is absent from a dataset
    #[error("Dataset '{dataset}' is missing required column '{column}'")]
    MissingColumn { dataset: String, column: String },

    /// A configured default names a field the dataset does not have
    #[error("Dataset '{dataset}' has no field '{field}'")]
    UnknownField { dataset: String, field: String },

    /// Requested dataset does not exist
    #[error("Dataset not found: {0}")]
    NotFound(String),

    /// Two sources produced the same dataset name
    #[error("Duplicate dataset name: {0}")]
    Duplicate(String),
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
