//! Error types for qroute

use thiserror::Error;

use crate::types::NodeId;

/// Main error type for qroute
///
/// Only construction and validation seams produce errors. Search failure is
/// never an error: an exhausted search reports "no path" through its outcome
/// value, and degenerate genetic operators fall back to the unmodified
/// parent.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for qroute operations
pub type Result<T> = std::result::Result<T, RouteError>;
