use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors raised before a search starts.
///
/// Not finding a path is not an error, see [`crate::space::SearchResult`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Unknown strategy '{0}'. Use 'bfs' or 'dfs'.")]
    UnknownStrategy(String),
}

#[derive(Debug, Error)]
pub enum GraphParseError {
    #[error("Line {line}: missing field '{field}' in '{text}'.")]
    MissingField {
        line: usize,
        field: &'static str,
        text: String,
    },
    #[error("Line {line}: invalid cost '{text}'.")]
    InvalidCost { line: usize, text: String },
    #[error("Line {line}: unexpected trailing field '{text}'.")]
    TrailingField { line: usize, text: String },
    #[error("Failed to read graph from {p:?}: {e}")]
    IOError { p: PathBuf, e: std::io::Error },
}

#[derive(Debug, Error)]
pub enum TableParseError {
    #[error("Line {line}: missing field '{field}' in '{text}'.")]
    MissingField {
        line: usize,
        field: &'static str,
        text: String,
    },
    #[error("Line {line}: invalid value '{text}'.")]
    InvalidValue { line: usize, text: String },
    #[error("Failed to read table from {p:?}: {e}")]
    IOError { p: PathBuf, e: std::io::Error },
}
