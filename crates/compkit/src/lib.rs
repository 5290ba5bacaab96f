//! Compkit: generated component code in, addressable records and live
//! previews out.
//!
//! A [`Batch`] holds the records extracted from one model reply and the
//! record currently selected. Previews are rebuilt on demand and never
//! cached, so a new selection or an edited body always renders fresh.
//!
//! # Example
//!
//! ```
//! use compkit::{Batch, Config, Role};
//!
//! let reply = "Here you go:\n```tsx\nconst Badge = ({ children }) => <span className=\"badge\">{children}</span>\n```";
//! let batch = Batch::from_reply(reply, &Config::default()).unwrap();
//!
//! assert_eq!(batch.selected().unwrap().role, Role::Badge);
//! let doc = batch.preview().unwrap();
//! assert!(doc.html.contains("\"Archived\""));
//! ```

mod batch;
mod config;
mod error;
mod export;
mod naming;

pub use batch::Batch;
pub use config::Config;
pub use error::{CompkitError, Result};
pub use export::{export_component, export_library, sanitize_file_name, ExportBundle, ExportFile, COMPONENTS_DIR};
pub use naming::{library_name_from_prompt, FALLBACK_LIBRARY_NAME};

pub use compkit_core::{
    ComponentRecord, ExtractError, Extraction, ImportSet, PreviewDocument, Resolution, Role, StylesheetText,
};
pub use compkit_extract::{extract, extract_structured, extract_with, ExtractOptions, Extractor};
pub use compkit_preview::{synthesize, PreviewError, PreviewOptions, Synthesizer};
