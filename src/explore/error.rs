//! Explore error types

use thiserror::Error;

use super::graph::{GraphError, Node};
use crate::dataset::DatasetError;

/// Errors raised while applying user input to an explore state
#[derive(Error, Debug)]
pub enum ControllerError {
    /// The requested dataset is not loaded
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    /// A field choice that the active dataset does not have
    #[error("Dataset '{dataset}' has no field '{field}' (requested for {node})")]
    UnknownField {
        dataset: String,
        field: String,
        node: Node,
    },

    /// The registry has no datasets to start a session with
    #[error("No datasets loaded")]
    NoDatasets,

    #[error("Dependency graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

/// Result type alias for controller operations
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Session store errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session expired: {0}")]
    Expired(String),

    #[error("Too many active sessions (limit {0})")]
    TooManySessions(usize),
}
