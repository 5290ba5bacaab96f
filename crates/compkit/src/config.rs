//! Pipeline configuration.

use crate::error::{CompkitError, Result};
use compkit_extract::ExtractOptions;
use compkit_preview::PreviewOptions;
use serde::{Deserialize, Serialize};

/// Options for both pipeline stages.
///
/// Every field has a default, so `{}` is a valid configuration and a partial
/// object only overrides what it names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extract: ExtractOptions,
    pub preview: PreviewOptions,
}

impl Config {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(CompkitError::Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_json(
            r#"{"extract": {"merge_by_role": false}, "preview": {"title": "Sandbox", "include_tailwind_runtime": false}}"#,
        )
        .unwrap();

        assert!(!config.extract.merge_by_role);
        assert!(config.extract.sanitize);
        assert_eq!(config.preview.title, "Sandbox");
        assert!(!config.preview.include_tailwind_runtime);
        assert_eq!(config.preview.root_id, "root");
    }

    #[test]
    fn test_invalid_json() {
        let err = Config::from_json("{\"extract\": 3}").unwrap_err();
        assert!(matches!(err, CompkitError::Config(_)));
        assert!(err.to_string().starts_with("Invalid configuration:"));
    }
}
