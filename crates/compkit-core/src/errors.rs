//! Error types for the compkit pipeline.
//!
//! Malformed model output is never an error: extraction degrades to a
//! best-effort record and synthesis degrades to a placeholder. The variants
//! here cover the cases where input a caller structurally needs is absent.

use thiserror::Error;

/// Errors raised while building or reading an extraction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Reply text is empty")]
    EmptyInput,

    #[error("Extraction contains no components")]
    NoComponents,

    #[error("Component index {index} is out of range for {len} components")]
    SelectionOutOfRange { index: usize, len: usize },

    #[error("Invalid structured reply: {0}")]
    InvalidStructuredReply(String),
}

/// Error returned when a string does not name a known role.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown component role: {0}")]
pub struct ParseRoleError(pub String);
