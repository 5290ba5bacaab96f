//! Component extraction from generated reply text.
//!
//! Turns the text a code-generating model produced into an ordered list of
//! [`ComponentRecord`]s with a detected role each, plus the imports,
//! stylesheet and type preamble the batch shares.
//!
//! # Example
//!
//! ```
//! use compkit_extract::extract;
//! use compkit_core::Role;
//!
//! let extraction = extract("const Button = () => {\n  return <button>Go</button>\n}");
//! assert_eq!(extraction.components[0].role, Role::Button);
//! ```

mod classify;
mod declarations;
mod extractor;
mod options;
mod sanitize;
mod scanner;
mod stylesheet;
mod structured;

pub use classify::RoleDetector;
pub use declarations::{is_export_aggregate, is_import_line, parse_head, DeclarationHead, HeadKind, Initializer};
pub use extractor::{hoist_imports, Extractor};
pub use options::ExtractOptions;
pub use sanitize::sanitize;
pub use scanner::{brace_counts, find_block_end, BlockEnd, DepthTracker};
pub use structured::{from_structured, StructuredReply};

pub use compkit_core::{ComponentRecord, ExtractError, Extraction, ImportSet, Role, StylesheetText};

/// Extract components with default options.
pub fn extract(reply: &str) -> Extraction {
    Extractor::new().extract(reply)
}

pub fn extract_with(reply: &str, options: &ExtractOptions) -> Extraction {
    Extractor::with_options(options.clone()).extract(reply)
}

/// Parse a JSON structured reply and build its extraction.
pub fn extract_structured(json: &str) -> Result<Extraction, ExtractError> {
    let reply = StructuredReply::from_json(json)?;
    from_structured(&reply, &RoleDetector::new())
}
