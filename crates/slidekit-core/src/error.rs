//! Error types for the presentation model.

use thiserror::Error;

/// Errors raised while loading or manipulating a presentation.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
    #[error("Markup error: {0}")]
    Markup(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for presentation model operations.
pub type CoreResult<T> = Result<T, CoreError>;
