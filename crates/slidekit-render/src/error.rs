//! Renderer errors.

use slidekit_core::CoreError;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Unsupported: {0}")]
    Unsupported(String),
    #[error("Markup error: {0}")]
    Markup(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;
