//! Template engine for preview documents.

use crate::error::{PreviewError, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// Name the document template is registered under.
pub const DOCUMENT: &str = "document";

/// The preview page. Values are inserted verbatim; callers escape script
/// and style content before rendering. The script goes in unindented so
/// multi-line template literals in the body keep their text. The plain
/// error listener reports failures that happen before React mounts, such
/// as a body that does not compile.
const DOCUMENT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{title}}</title>
{{#each scripts}}
  <script src="{{this}}"></script>
{{/each}}
{{#if tailwind_config}}
  <script>
    tailwind.config = {{tailwind_config}};
  </script>
{{/if}}
  <script>
    window.addEventListener("error", function (event) {
      var root = document.getElementById({{json root_id}});
      if (root && !root.hasChildNodes()) {
        root.style.color = "#b91c1c";
        root.style.fontFamily = "ui-monospace, monospace";
        root.textContent = "Error: " + event.message;
      }
    });
  </script>
  <style>
{{#if stylesheet}}
{{indent stylesheet 4}}

{{/if}}
    body {
      margin: 0;
      padding: {{body_padding}};
      min-height: 100vh;
      display: flex;
      align-items: center;
      justify-content: center;
    }
  </style>
</head>
<body>
  <div id="{{root_id}}"></div>
  <script type="text/babel" data-presets="typescript,react">
{{script}}
  </script>
</body>
</html>
"##;

/// Template engine using Handlebars.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create an engine with the document template registered.
    pub fn new() -> Result<Self> {
        let mut engine = Self::empty();
        engine.register_template(DOCUMENT, DOCUMENT_TEMPLATE)?;
        Ok(engine)
    }

    /// Create an engine with helpers but no templates.
    pub fn empty() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(PreviewError::InvalidTemplate)?;
        Ok(())
    }

    /// Render a registered template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars.render(name, data).map_err(PreviewError::Template)
    }

    fn register_helpers(handlebars: &mut Handlebars) {
        // Indent every non-blank line
        handlebars.register_helper(
            "indent",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let content = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
                    let spaces = h.param(1).and_then(|v| v.value().as_u64()).unwrap_or(4) as usize;

                    out.write(&indent(content, spaces))?;
                    Ok(())
                },
            ),
        );

        // JSON literal of any value, safe inside a script element
        handlebars.register_helper(
            "json",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let value = h.param(0).map(|v| v.value().clone()).unwrap_or_default();
                    out.write(&js_literal(&value))?;
                    Ok(())
                },
            ),
        );
    }
}

/// Prefix every non-blank line of `content` with `spaces` spaces.
pub fn indent(content: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A JSON value as a JavaScript literal that cannot close its script tag.
pub fn js_literal(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// A string as a JavaScript string literal.
pub fn js_string(value: &str) -> String {
    js_literal(&serde_json::Value::String(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(template: &str, data: &serde_json::Value) -> String {
        let mut engine = TemplateEngine::empty();
        engine.register_template("inline", template).unwrap();
        engine.render("inline", data).unwrap()
    }

    #[test]
    fn test_render_without_escaping() {
        let result = render("<b>{{name}}</b>", &json!({"name": "a < b && \"c\""}));
        assert_eq!(result, "<b>a < b && \"c\"</b>");
    }

    #[test]
    fn test_indent_helper() {
        let result = render("{{indent body 2}}", &json!({"body": "a\n\nb"}));
        assert_eq!(result, "  a\n\n  b");
    }

    #[test]
    fn test_json_helper() {
        let result = render("{{json label}} {{json root}}", &json!({"label": "</script>", "root": "app"}));
        assert_eq!(result, r#""<\/script>" "app""#);
    }

    #[test]
    fn test_document_script_is_not_reindented() {
        let engine = TemplateEngine::new().unwrap();
        let html = engine
            .render(
                DOCUMENT,
                &json!({"title": "t", "root_id": "root", "body_padding": "0", "script": "const a = `\nx\n`;"}),
            )
            .unwrap();
        assert!(html.contains("\nconst a = `\nx\n`;\n"));
    }

    #[test]
    fn test_unknown_template() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render("missing", &json!({}));
        assert!(matches!(err, Err(PreviewError::Template(_))));
    }

    #[test]
    fn test_invalid_template() {
        let mut engine = TemplateEngine::empty();
        let err = engine.register_template("broken", "{{#if ready}}open");
        assert!(matches!(err, Err(PreviewError::InvalidTemplate(_))));
    }
}
