//! Error types for seltree
//!
//! Selection operations never fail on bad indices; they report `false` instead.
//! Errors are reserved for stale node handles and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::NodeId;

/// Result type alias for seltree operations
pub type SelectionResult<T> = Result<T, SelectionError>;

/// Main error type for seltree operations
#[derive(Error, Debug)]
pub enum SelectionError {
    /// The node was discarded together with its subtree
    #[error("selection node {0:?} no longer exists")]
    StaleNode(NodeId),

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
