//! Error types for sorting and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while sorting a table.
///
/// A failed sort is not rolled back: whatever was mutated before the failure
/// stays mutated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error("table '{0}' was not registered by the sorter")]
    UnknownTable(String),

    #[error("table '{0}' has no body")]
    MissingBody(String),

    #[error("row {row} of table '{table}' has no cell at column {column}")]
    MissingCell {
        table: String,
        row: usize,
        column: usize,
    },

    #[error("header '{0}' has no sort icon")]
    MissingIcon(String),

    #[error("table '{table}' has no header at column {column}")]
    UnknownColumn { table: String, column: usize },

    #[error(transparent)]
    Dom(#[from] tabledom::DomError),
}

/// Errors raised while loading a [`SorterConfig`](crate::SorterConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
