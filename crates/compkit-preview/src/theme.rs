//! Tailwind runtime configuration for the preview document.

use crate::options::PreviewOptions;
use crate::templates::js_literal;
use serde_json::{json, Value};

/// `tailwind.config` object: theme colours plus the radius and shadow
/// scales the generated components are styled against.
pub fn tailwind_config(options: &PreviewOptions) -> Value {
    json!({
        "theme": {
            "extend": {
                "colors": options.theme_colors,
                "borderRadius": {
                    "lg": "var(--radius)",
                    "md": "calc(var(--radius) - 2px)",
                    "sm": "calc(var(--radius) - 4px)",
                    "xs": "calc(var(--radius) - 6px)",
                },
                "boxShadow": {
                    "xs": "0 1px 2px 0 rgba(15, 23, 42, 0.05)",
                    "sm": "0 1px 3px 0 rgba(15, 23, 42, 0.1)",
                    "md": "0 4px 6px -1px rgba(15, 23, 42, 0.1), 0 2px 4px -2px rgba(15, 23, 42, 0.1)",
                    "lg": "0 10px 15px -3px rgba(15, 23, 42, 0.1), 0 4px 6px -4px rgba(15, 23, 42, 0.1)",
                },
                "ringWidth": { "3": "3px" },
                "transitionProperty": {
                    "color": "color, background-color, border-color, text-decoration-color, fill, stroke",
                    "spacing": "margin, padding, gap, inset, space, width, height",
                },
            }
        }
    })
}

/// The config as script text, empty when the runtime is disabled.
pub fn tailwind_config_script(options: &PreviewOptions) -> String {
    if options.include_tailwind_runtime {
        js_literal(&tailwind_config(options))
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_follow_options() {
        let mut options = PreviewOptions::default();
        options.theme_colors.insert("brand".to_string(), "#ff6600".to_string());

        let config = tailwind_config(&options);
        let colors = &config["theme"]["extend"]["colors"];
        assert_eq!(colors["primary"], "hsl(var(--primary))");
        assert_eq!(colors["brand"], "#ff6600");
        assert_eq!(config["theme"]["extend"]["borderRadius"]["xs"], "calc(var(--radius) - 6px)");
    }

    #[test]
    fn test_disabled_runtime_has_no_config() {
        let options = PreviewOptions {
            include_tailwind_runtime: false,
            ..PreviewOptions::default()
        };
        assert!(tailwind_config_script(&options).is_empty());
        assert!(tailwind_config_script(&PreviewOptions::default()).starts_with("{\"theme\""));
    }
}
