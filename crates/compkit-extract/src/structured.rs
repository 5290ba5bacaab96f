//! Replies where the model returned a JSON object instead of free text.

use crate::classify::RoleDetector;
use crate::extractor::hoist_imports;
use compkit_core::{ComponentRecord, ExtractError, Extraction, ImportSet, Role, StylesheetText};
use convert_case::{Case, Casing};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// `{"components": {"button": "…", …}, "css": "…"}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredReply {
    /// Source per component, keyed by a role or component name.
    pub components: IndexMap<String, String>,
    #[serde(default, alias = "css", skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<String>,
}

impl StructuredReply {
    pub fn from_json(json: &str) -> Result<Self, ExtractError> {
        serde_json::from_str(json).map_err(|e| ExtractError::InvalidStructuredReply(e.to_string()))
    }
}

/// Build an extraction from a structured reply, one record per entry.
///
/// Keys are PascalCased to form the declared name. A key that names a role
/// sets the role; otherwise the role is classified from the key and source.
pub fn from_structured(reply: &StructuredReply, detector: &RoleDetector) -> Result<Extraction, ExtractError> {
    let mut imports = ImportSet::new();
    let mut components = Vec::with_capacity(reply.components.len());

    for (key, source) in &reply.components {
        let body = hoist_imports(source, &mut imports);
        if body.is_empty() {
            debug!(%key, "skipping empty structured entry");
            continue;
        }
        let name = key.trim().to_case(Case::Pascal);
        let role = Role::from_name(key).unwrap_or_else(|| detector.classify(Some(&name), &body));
        components.push(ComponentRecord::new(name, role, body));
    }

    if components.is_empty() {
        return Err(ExtractError::NoComponents);
    }

    let stylesheet = reply
        .stylesheet
        .as_deref()
        .map(str::trim)
        .filter(|css| !css.is_empty())
        .map(StylesheetText::new);

    debug!(components = components.len(), "built extraction from structured reply");

    Ok(Extraction {
        imports,
        stylesheet,
        preamble: None,
        components,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_reply() {
        let json = r#"{
            "components": {
                "button": "import { cn } from \"@/lib/utils\"\nconst Button = () => <button />",
                "pricing card": "const PricingCard = () => <div className=\"rounded\" />",
                "empty": "  "
            },
            "css": ".btn { color: red; }"
        }"#;
        let reply = StructuredReply::from_json(json).unwrap();
        let extraction = from_structured(&reply, &RoleDetector::new()).unwrap();

        assert_eq!(extraction.names(), vec!["Button", "PricingCard"]);
        assert_eq!(extraction.components[0].role, Role::Button);
        assert_eq!(extraction.components[1].role, Role::Card);
        assert_eq!(extraction.components[0].body, "const Button = () => <button />");
        assert_eq!(extraction.imports.len(), 1);
        assert_eq!(
            extraction.stylesheet.as_ref().map(|s| s.as_str()),
            Some(".btn { color: red; }")
        );
    }

    #[test]
    fn test_invalid_json() {
        let err = StructuredReply::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidStructuredReply(_)));
    }

    #[test]
    fn test_all_entries_empty() {
        let reply = StructuredReply::from_json(r#"{"components": {"button": ""}}"#).unwrap();
        assert_eq!(
            from_structured(&reply, &RoleDetector::new()),
            Err(ExtractError::NoComponents)
        );
    }
}
