//! Error types for preview synthesis.

use thiserror::Error;

/// Result type alias for preview operations.
pub type Result<T> = std::result::Result<T, PreviewError>;

/// Errors that can occur while building a preview document.
///
/// A record that cannot be resolved is not an error; it renders the
/// "not exported" placeholder instead.
#[derive(Error, Debug)]
pub enum PreviewError {
    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// Preview requested with no component selected.
    #[error("No component selected for preview")]
    NoSelection,
}
