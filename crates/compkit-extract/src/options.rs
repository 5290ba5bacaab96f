//! Extraction options.

use serde::{Deserialize, Serialize};

/// Options controlling extraction.
///
/// Deserializes with defaults for every missing field, so a partial JSON
/// object only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Strip reasoning blocks, code fences and comments first.
    pub sanitize: bool,
    /// Merge declarations that share a role into one record.
    pub merge_by_role: bool,
    /// Name for the single fallback record when no identifier is found.
    pub fallback_name: String,
    /// Suffix marking a helper declaration of `<Base>`.
    pub variant_suffix: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            sanitize: true,
            merge_by_role: true,
            fallback_name: "Component".to_string(),
            variant_suffix: "variants".to_string(),
        }
    }
}
