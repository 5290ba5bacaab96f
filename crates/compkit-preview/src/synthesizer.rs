//! Preview document synthesis.

use crate::error::Result;
use crate::options::PreviewOptions;
use crate::script::{prepare, PreparedBody};
use crate::stand_ins::{StandInSet, BASE_HELPERS, FALLBACK_BUTTON};
use crate::symbols::{looks_like_component, SymbolTable};
use crate::templates::{indent, js_string, TemplateEngine, DOCUMENT};
use crate::theme::tailwind_config_script;
use crate::usage::{ExampleBuilder, MOUNTED};
use compkit_core::{ComponentRecord, Extraction, ImportSet, PreviewDocument, Resolution, StylesheetText};
use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, warn};

/// Values the document template is rendered with.
#[derive(Debug, Serialize)]
struct DocumentContext<'a> {
    title: String,
    scripts: Vec<&'a str>,
    tailwind_config: String,
    stylesheet: String,
    body_padding: &'a str,
    root_id: &'a str,
    script: String,
}

/// Builds one preview document per component record.
///
/// Synthesis is a pure transformation: the same record, stylesheet and
/// options always produce the same document.
pub struct Synthesizer<'a> {
    options: PreviewOptions,
    engine: TemplateEngine<'a>,
}

impl<'a> Synthesizer<'a> {
    /// Create a synthesizer with default options.
    pub fn new() -> Result<Self> {
        Self::with_options(PreviewOptions::default())
    }

    pub fn with_options(options: PreviewOptions) -> Result<Self> {
        Ok(Self {
            options,
            engine: TemplateEngine::new()?,
        })
    }

    pub fn options(&self) -> &PreviewOptions {
        &self.options
    }

    /// Build the preview for `record` with the batch stylesheet inlined.
    ///
    /// Icons are recognized from the imports the record carries and from
    /// any import left inside its body.
    pub fn synthesize(&self, record: &ComponentRecord, stylesheet: Option<&StylesheetText>) -> Result<PreviewDocument> {
        self.build(record, stylesheet, &ImportSet::new(), None)
    }

    /// Build the preview for `record` as part of `extraction`: the batch
    /// stylesheet is inlined, the batch preamble runs ahead of the body and
    /// every batch import counts toward icon detection. The record may be an
    /// edited copy of one of the extraction's records.
    pub fn synthesize_in(&self, record: &ComponentRecord, extraction: &Extraction) -> Result<PreviewDocument> {
        self.build(
            record,
            extraction.stylesheet.as_ref(),
            &extraction.imports,
            extraction.preamble.as_deref(),
        )
    }

    fn build(
        &self,
        record: &ComponentRecord,
        stylesheet: Option<&StylesheetText>,
        batch_imports: &ImportSet,
        preamble: Option<&str>,
    ) -> Result<PreviewDocument> {
        let own = prepare(&record.body, &record.declared_name);
        let resolution = resolve(record, &own.table);
        let prepared = match preamble.map(str::trim).filter(|p| !p.is_empty()) {
            Some(preamble) => prepare(&format!("{preamble}\n\n{}", record.body), &record.declared_name),
            None => own,
        };

        let icons = self.icon_bindings([batch_imports, &record.imports, &prepared.imports]);
        let stand_ins = StandInSet::plan(&prepared.table, &icons);

        match &resolution {
            Resolution::Missing(name) => warn!(name = %name, "no mountable symbol, rendering placeholder"),
            resolved => debug!(symbol = resolved.symbol(), ?resolved, "resolved mounted symbol"),
        }
        if !stand_ins.is_empty() {
            debug!(count = stand_ins.len(), names = ?stand_ins.names(), "stand-ins injected");
        }

        let script = self.script(record, &prepared, &stand_ins, &resolution);
        let html = self.render_document(script, stylesheet)?;

        Ok(PreviewDocument {
            html,
            role: record.role,
            mounted: resolution,
            stand_ins: stand_ins.names(),
        })
    }

    fn icon_bindings(&self, sources: [&ImportSet; 3]) -> Vec<String> {
        let is_icon = |module: &str| self.options.is_icon_source(module);
        let names: IndexSet<String> = sources
            .into_iter()
            .flat_map(|imports| imports.bindings_from(is_icon))
            .collect();
        names.into_iter().collect()
    }

    fn script(
        &self,
        record: &ComponentRecord,
        prepared: &PreparedBody,
        stand_ins: &StandInSet,
        resolution: &Resolution,
    ) -> String {
        let mut sections = vec![
            "const React = window.React;\nconst ReactDOM = window.ReactDOM;\nconst h = React.createElement;".to_string(),
            BASE_HELPERS.to_string(),
        ];

        let example = match resolution {
            Resolution::Missing(name) => format!("  return renderMissing({});", js_string(name)),
            resolved => {
                let example = ExampleBuilder::new(&prepared.table).build(record.role);
                if example.uses_fallback_button {
                    sections.push(FALLBACK_BUTTON.to_string());
                }
                format!(
                    "  const {MOUNTED} = registry[{symbol}];\n  if (!{MOUNTED}) return renderMissing({symbol});\n  return (\n{node}\n  );",
                    symbol = js_string(resolved.symbol()),
                    node = example.node.to_js(4),
                )
            }
        };

        let injected: Vec<&str> = stand_ins.iter().map(|s| s.name.as_str()).collect();
        if injected.is_empty() {
            sections.push("const scope = {};".to_string());
        } else {
            sections.push(format!(
                "const createScope = () => {{\n{}\n\n  return {{ {} }};\n}};\n\nconst scope = createScope();",
                indent(&stand_ins.render(), 2),
                injected.join(", ")
            ));
        }

        sections.push(define_components(&prepared.source, &injected, &prepared.table));
        sections.push(format!(
            "const renderPreview = () => {{\n  const registry = {{ ...scope, ...defineComponents(scope) }};\n{example}\n}};"
        ));
        sections.push(RENDER_GUARD.replace("__ROOT__", &js_string(&self.options.root_id)));

        sections.join("\n\n")
    }

    fn render_document(&self, script: String, stylesheet: Option<&StylesheetText>) -> Result<String> {
        let options = &self.options;
        let mut scripts = vec![
            options.scripts.react.as_str(),
            options.scripts.react_dom.as_str(),
            options.scripts.babel.as_str(),
        ];
        if options.include_tailwind_runtime {
            scripts.push(options.scripts.tailwind.as_str());
        }

        let context = DocumentContext {
            title: escape_html(&options.title),
            scripts,
            tailwind_config: tailwind_config_script(options),
            stylesheet: stylesheet
                .filter(|sheet| !sheet.is_blank())
                .map(StylesheetText::sanitized_for_inline)
                .unwrap_or_default(),
            body_padding: &options.body_padding,
            root_id: &options.root_id,
            script,
        };

        self.engine.render(DOCUMENT, &context)
    }
}

const RENDER_GUARD: &str = r#"class PreviewBoundary extends React.Component {
  constructor(props) {
    super(props);
    this.state = { error: null };
  }

  static getDerivedStateFromError(error) {
    return { error };
  }

  render() {
    return this.state.error ? renderError(this.state.error) : this.props.children;
  }
}

const Preview = () => renderPreview();
const container = document.getElementById(__ROOT__);

try {
  ReactDOM.createRoot(container).render(h(PreviewBoundary, null, h(Preview)));
} catch (error) {
  ReactDOM.createRoot(container).render(renderError(error));
}"#;

/// Stand-ins arrive through `scope`. The body runs in its own block so its
/// declarations may shadow them.
fn define_components(source: &str, injected: &[&str], table: &SymbolTable) -> String {
    let mut out = String::from("const defineComponents = (scope) => {\n");
    if !injected.is_empty() {
        out.push_str(&format!("  const {{ {} }} = scope;\n", injected.join(", ")));
    }
    out.push_str("  {\n");
    out.push_str(source);
    out.push_str("\n\n    return {\n");
    for name in table.top_level() {
        out.push_str(&format!("      {name}: typeof {name} !== \"undefined\" ? {name} : undefined,\n"));
    }
    out.push_str("    };\n  }\n};");
    out
}

/// Decide which symbol to mount.
///
/// The declared name wins when the body defines it; then the first exported
/// component-looking identifier; then the role's conventional symbol.
pub fn resolve(record: &ComponentRecord, table: &SymbolTable) -> Resolution {
    let declared = record.declared_name.as_str();
    if looks_like_component(declared) && table.defines(declared) {
        return Resolution::Declared(declared.to_string());
    }
    if let Some(name) = table
        .exported()
        .find(|name| looks_like_component(name) && table.defines(name))
    {
        return Resolution::Exported(name.to_string());
    }
    if let Some(name) = record
        .role
        .canonical_symbols()
        .iter()
        .find(|name| table.defines(name))
    {
        return Resolution::RoleFallback(name.to_string());
    }
    Resolution::Missing(declared.to_string())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use compkit_core::Role;

    fn record(name: &str, role: Role, body: &str) -> ComponentRecord {
        ComponentRecord::new(name, role, body)
    }

    fn resolve_body(name: &str, role: Role, body: &str) -> Resolution {
        let prepared = prepare(body, name);
        resolve(&record(name, role, body), &prepared.table)
    }

    #[test]
    fn test_resolution_order() {
        assert_eq!(
            resolve_body("Button", Role::Button, "const Button = () => <button />"),
            Resolution::Declared("Button".to_string())
        );
        assert_eq!(
            resolve_body(
                "Primary",
                Role::Button,
                "const buttonVariants = cva(\"x\")\nexport const Action = () => <button />"
            ),
            Resolution::Exported("Action".to_string())
        );
        assert_eq!(
            resolve_body("Thing", Role::Card, "function Card() {\n  return <div />\n}"),
            Resolution::RoleFallback("Card".to_string())
        );
        assert_eq!(
            resolve_body("Widget", Role::Component, "const helper = () => 1"),
            Resolution::Missing("Widget".to_string())
        );
    }

    #[test]
    fn test_lowercase_declared_name_is_not_mounted() {
        let resolution = resolve_body("cn", Role::Component, "export function cn(...inputs) {\n  return inputs.join(\" \")\n}");
        assert!(resolution.is_missing());
    }

    #[test]
    fn test_anonymous_body_resolves_to_declared_name() {
        let resolution = resolve_body("Hero", Role::Component, "export default () => <section />");
        assert_eq!(resolution, Resolution::Declared("Hero".to_string()));
    }

    #[test]
    fn test_define_components_returns_top_level_names() {
        let table = SymbolTable::scan("const a = 1\nconst B = () => null");
        let js = define_components("const a = 1\nconst B = () => null", &["cn"], &table);

        assert!(js.starts_with("const defineComponents = (scope) => {\n  const { cn } = scope;\n  {\n"));
        assert!(js.contains("      B: typeof B !== \"undefined\" ? B : undefined,\n"));
        assert!(js.ends_with("    };\n  }\n};"));
    }

    #[test]
    fn test_document_shape() {
        let synthesizer = Synthesizer::new().unwrap();
        let doc = synthesizer
            .synthesize(&record("Badge", Role::Badge, "const Badge = ({ children }) => <span>{children}</span>"), None)
            .unwrap();

        assert!(doc.html.starts_with("<!DOCTYPE html>"));
        assert!(doc.html.contains("<title>Component Preview</title>"));
        assert!(doc.html.contains("https://cdn.tailwindcss.com"));
        assert!(doc.html.contains("tailwind.config = {\"theme\""));
        assert!(doc.html.contains("const Mounted = registry[\"Badge\"];"));
        assert!(doc.html.contains("\"Archived\""));
        assert!(doc.html.contains("document.getElementById(\"root\")"));
        assert_eq!(doc.mounted, Resolution::Declared("Badge".to_string()));
        assert!(doc.stand_ins.is_empty());
    }

    #[test]
    fn test_options_shape_document() {
        let options = PreviewOptions {
            include_tailwind_runtime: false,
            title: "Tom & Jerry <3".to_string(),
            root_id: "app".to_string(),
            ..PreviewOptions::default()
        };
        let synthesizer = Synthesizer::with_options(options).unwrap();
        let doc = synthesizer
            .synthesize(&record("Widget", Role::Component, "const Widget = () => <p />"), None)
            .unwrap();

        assert!(doc.html.contains("<title>Tom &amp; Jerry &lt;3</title>"));
        assert!(doc.html.contains("<div id=\"app\"></div>"));
        assert!(!doc.html.contains("tailwind"));
    }

    #[test]
    fn test_stylesheet_inlined() {
        let synthesizer = Synthesizer::new().unwrap();
        let sheet = StylesheetText::new("@tailwind base;\n:root { --radius: 0.5rem; }");
        let doc = synthesizer
            .synthesize(&record("Widget", Role::Component, "const Widget = () => <p />"), Some(&sheet))
            .unwrap();

        assert!(doc.html.contains("--radius: 0.5rem;"));
        assert!(!doc.html.contains("@tailwind"));
    }

    #[test]
    fn test_batch_icon_imports() {
        let mut imports = ImportSet::new();
        imports.insert("import { Mail, Settings } from \"lucide-react\";");
        let body = "const Button = () => <button><Mail size={16} />Send</button>";
        let extraction = Extraction {
            imports,
            ..Extraction::default()
        };

        let synthesizer = Synthesizer::new().unwrap();
        let doc = synthesizer
            .synthesize_in(&record("Button", Role::Button, body), &extraction)
            .unwrap();

        assert_eq!(doc.stand_ins, vec!["Mail".to_string()]);
        assert!(doc.html.contains("const Mail = createIcon(\"Mail\");"));
    }

    #[test]
    fn test_record_imports_name_icons() {
        let mut imports = ImportSet::new();
        imports.insert("import { Mail } from \"lucide-react\"");
        let body = "const Button = () => <button><Mail size={16} />Send</button>";
        let button = record("Button", Role::Button, body).with_imports_from(&imports);

        let doc = Synthesizer::new().unwrap().synthesize(&button, None).unwrap();

        assert!(doc.html.contains("const Mail = createIcon(\"Mail\");"));
        assert!(!doc.html.contains("createPrimitive(\"div\", \"Mail\")"));
    }

    #[test]
    fn test_preamble_runs_before_body() {
        let extraction = Extraction {
            preamble: Some("export const SIZES = {\n  sm: \"h-8\",\n}".to_string()),
            ..Extraction::default()
        };
        let body = "export const Button = ({ size = \"sm\" }) => <button className={SIZES[size]} />";

        let doc = Synthesizer::new()
            .unwrap()
            .synthesize_in(&record("Button", Role::Button, body), &extraction)
            .unwrap();

        let sizes = doc.html.find("const SIZES = {").unwrap();
        let button = doc.html.find("const Button = ").unwrap();
        assert!(sizes < button);
        assert_eq!(doc.mounted, Resolution::Declared("Button".to_string()));
    }

    #[test]
    fn test_interface_is_never_mounted() {
        let body = "export interface PrimaryButtonProps {\n  tone?: string\n}\nexport const PrimaryButton = (props: PrimaryButtonProps) => <button {...props} />";
        assert_eq!(
            resolve_body("Primary", Role::Button, body),
            Resolution::Exported("PrimaryButton".to_string())
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
