//! Preview synthesis for extracted components.
//!
//! Turns one [`ComponentRecord`] into a self-contained HTML document that
//! loads React from a CDN, injects stand-ins for the primitives the body
//! uses without defining, and mounts a usage example picked by the record's
//! role. Symbol resolution happens here, before any script runs: the
//! document names the symbol it mounts, or renders a visible "not
//! exported" placeholder.
//!
//! # Example
//!
//! ```
//! use compkit_core::{ComponentRecord, Role};
//! use compkit_preview::synthesize;
//!
//! let record = ComponentRecord::new("Badge", Role::Badge, "const Badge = ({ children }) => <span>{children}</span>");
//! let doc = synthesize(&record, None).unwrap();
//! assert!(!doc.is_placeholder());
//! assert!(doc.html.contains("registry[\"Badge\"]"));
//! ```

mod error;
mod options;
mod script;
mod stand_ins;
mod symbols;
mod synthesizer;
mod templates;
mod theme;
mod usage;

pub use error::{PreviewError, Result};
pub use options::{PreviewOptions, RuntimeScripts};
pub use script::{escape_script, prepare, PreparedBody};
pub use stand_ins::{StandIn, StandInKind, StandInSet};
pub use symbols::{looks_like_component, SymbolTable};
pub use synthesizer::{resolve, Synthesizer};
pub use templates::TemplateEngine;
pub use theme::tailwind_config;

pub use compkit_core::{ComponentRecord, ImportSet, PreviewDocument, Resolution, Role, StylesheetText};

/// Synthesize a preview with default options.
pub fn synthesize(record: &ComponentRecord, stylesheet: Option<&StylesheetText>) -> Result<PreviewDocument> {
    Synthesizer::new()?.synthesize(record, stylesheet)
}
