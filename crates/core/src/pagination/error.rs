use thiserror::Error;

/// Errors raised by a [`PageSource`](super::PageSource) while counting or fetching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

/// Result type for page source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
