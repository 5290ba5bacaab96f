//! Preview document options.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Runtime script locations loaded by the preview document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeScripts {
    pub react: String,
    pub react_dom: String,
    pub babel: String,
    pub tailwind: String,
}

impl Default for RuntimeScripts {
    fn default() -> Self {
        Self {
            react: "https://unpkg.com/react@18/umd/react.development.js".to_string(),
            react_dom: "https://unpkg.com/react-dom@18/umd/react-dom.development.js".to_string(),
            babel: "https://unpkg.com/@babel/standalone/babel.min.js".to_string(),
            tailwind: "https://cdn.tailwindcss.com".to_string(),
        }
    }
}

/// Options for preview synthesis.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewOptions {
    pub scripts: RuntimeScripts,
    /// Load the tailwind runtime and its theme config.
    pub include_tailwind_runtime: bool,
    /// Id of the element the preview mounts into.
    pub root_id: String,
    pub title: String,
    /// CSS padding of the document body.
    pub body_padding: String,
    /// Design token colours, token name to CSS value.
    pub theme_colors: IndexMap<String, String>,
    /// Modules whose named imports are icons.
    pub icon_sources: Vec<String>,
}

const THEME_TOKENS: &[&str] = &[
    "background",
    "foreground",
    "card",
    "card-foreground",
    "primary",
    "primary-foreground",
    "secondary",
    "secondary-foreground",
    "accent",
    "accent-foreground",
    "destructive",
    "destructive-foreground",
    "muted",
    "muted-foreground",
    "border",
    "input",
    "ring",
    "popover",
    "popover-foreground",
];

impl Default for PreviewOptions {
    fn default() -> Self {
        let theme_colors = THEME_TOKENS
            .iter()
            .map(|token| (token.to_string(), format!("hsl(var(--{token}))")))
            .collect();

        Self {
            scripts: RuntimeScripts::default(),
            include_tailwind_runtime: true,
            root_id: "root".to_string(),
            title: "Component Preview".to_string(),
            body_padding: "2rem".to_string(),
            theme_colors,
            icon_sources: vec![
                "lucide-react".to_string(),
                "@radix-ui/react-icons".to_string(),
                "@heroicons/react".to_string(),
                "react-icons".to_string(),
            ],
        }
    }
}

impl PreviewOptions {
    /// Whether `module` is one of the icon sources or a subpath of one.
    pub fn is_icon_source(&self, module: &str) -> bool {
        self.icon_sources.iter().any(|source| {
            module == source
                || module
                    .strip_prefix(source.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options: PreviewOptions =
            serde_json::from_str(r#"{"root_id": "app", "scripts": {"babel": "/babel.js"}}"#).unwrap();

        assert_eq!(options.root_id, "app");
        assert_eq!(options.scripts.babel, "/babel.js");
        assert_eq!(options.scripts.react, RuntimeScripts::default().react);
        assert!(options.include_tailwind_runtime);
        assert_eq!(options.theme_colors.len(), 19);
    }

    #[test]
    fn test_icon_sources() {
        let options = PreviewOptions::default();
        assert!(options.is_icon_source("lucide-react"));
        assert!(options.is_icon_source("@heroicons/react/24/outline"));
        assert!(options.is_icon_source("react-icons/fa"));
        assert!(!options.is_icon_source("react"));
        assert!(!options.is_icon_source("lucide-reactive"));
    }

    #[test]
    fn test_theme_colors_use_css_variables() {
        let options = PreviewOptions::default();
        assert_eq!(
            options.theme_colors.get("muted-foreground").map(String::as_str),
            Some("hsl(var(--muted-foreground))")
        );
    }
}
