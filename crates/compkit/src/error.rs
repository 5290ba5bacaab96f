//! Error types for the compkit facade.

use compkit_core::ExtractError;
use compkit_preview::PreviewError;
use thiserror::Error;

/// Result type alias for facade operations.
pub type Result<T> = std::result::Result<T, CompkitError>;

/// Errors surfaced by batches, configuration and export.
#[derive(Error, Debug)]
pub enum CompkitError {
    /// Extraction or selection error.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Preview synthesis error.
    #[error(transparent)]
    Preview(#[from] PreviewError),

    /// Configuration JSON could not be read.
    #[error("Invalid configuration: {0}")]
    Config(#[source] serde_json::Error),

    /// Writing export files failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
