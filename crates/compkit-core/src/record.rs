//! Extracted component records and the batch-level data they share.

use crate::errors::ExtractError;
use crate::types::Role;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

/// Block comments, including one left open at the end of the sheet.
static CSS_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?(?:\*/|\z)").unwrap());

static TAILWIND_DIRECTIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*@tailwind\b.*(?:\n|\z)").unwrap());

static STYLE_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</(style)").unwrap());

/// One extracted component.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentRecord {
    /// Identifier used in the source text. Not unique across a batch.
    pub declared_name: String,
    /// Advisory classification.
    pub role: Role,
    /// Verbatim declaration source, imports hoisted out.
    pub body: String,
    /// Helper declarations folded into this record, in source order.
    pub auxiliary_names: SmallVec<[String; 2]>,
    /// Batch imports whose bindings the body mentions.
    pub imports: ImportSet,
}

impl ComponentRecord {
    /// Create a record with no auxiliary declarations.
    pub fn new(declared_name: impl Into<String>, role: Role, body: impl Into<String>) -> Self {
        Self {
            declared_name: declared_name.into(),
            role,
            body: body.into(),
            auxiliary_names: SmallVec::new(),
            imports: ImportSet::new(),
        }
    }

    /// Builder-style auxiliary names.
    pub fn with_auxiliary<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.auxiliary_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Keep the statements of `imports` that bind a name the body uses.
    pub fn with_imports_from(mut self, imports: &ImportSet) -> Self {
        self.imports = imports.referenced_by(&self.body);
        self
    }

    /// Opening minus closing braces in the body.
    pub fn delimiter_balance(&self) -> i64 {
        self.body.chars().fold(0, |depth, c| match c {
            '{' => depth + 1,
            '}' => depth - 1,
            _ => depth,
        })
    }

    /// Whether the body has as many closing braces as opening ones.
    pub fn is_balanced(&self) -> bool {
        self.delimiter_balance() == 0
    }

    /// Whether a line of the body exports `name`.
    pub fn exports(&self, name: &str) -> bool {
        self.body.lines().any(|line| {
            let line = line.trim_start();
            line.starts_with("export") && contains_word(line, name)
        })
    }

    /// Serialize this record as a standalone module.
    ///
    /// Hoisted imports come first, then the batch preamble, then the body.
    /// An export line is appended when the body does not already export
    /// its declared name.
    pub fn to_module(&self, imports: &ImportSet, preamble: Option<&str>) -> String {
        let mut out = String::new();

        if !imports.is_empty() {
            out.push_str(&imports.render());
            out.push_str("\n\n");
        }

        if let Some(preamble) = preamble.map(str::trim).filter(|p| !p.is_empty()) {
            out.push_str(preamble);
            out.push_str("\n\n");
        }

        out.push_str(self.body.trim_end());
        out.push('\n');

        if !self.exports(&self.declared_name) {
            let mut names = vec![self.declared_name.as_str()];
            names.extend(
                self.auxiliary_names
                    .iter()
                    .map(String::as_str)
                    .filter(|aux| !self.exports(aux)),
            );
            out.push_str(&format!("\nexport {{ {} }};\n", names.join(", ")));
        }

        out
    }
}

/// Whether `haystack` contains `word` delimited by non-identifier characters.
pub fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let is_ident = |c: char| c.is_alphanumeric() || c == '_' || c == '$';
    haystack.match_indices(word).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + word.len()..].chars().next();
        !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
    })
}

/// Deduplicated import statements for one batch, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImportSet {
    statements: IndexSet<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement. Whitespace runs are collapsed so a multi-line
    /// import and its single-line spelling collapse to one entry.
    /// Returns false if the statement was already present.
    pub fn insert(&mut self, statement: &str) -> bool {
        let normalized = statement.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.is_empty() {
            return false;
        }
        self.statements.insert(normalized)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.statements.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// One statement per line.
    pub fn render(&self) -> String {
        self.iter().collect::<Vec<_>>().join("\n")
    }

    /// Statements binding at least one name that `source` mentions as a
    /// whole word. Side-effect imports bind nothing and are left out.
    pub fn referenced_by(&self, source: &str) -> ImportSet {
        let statements = self
            .statements
            .iter()
            .filter(|statement| {
                local_bindings(statement)
                    .iter()
                    .any(|name| contains_word(source, name))
            })
            .cloned()
            .collect();
        ImportSet { statements }
    }

    /// Named bindings imported from any module whose specifier satisfies
    /// `source`. `A as B` yields the local name `B`; `type` imports are skipped.
    pub fn bindings_from<F>(&self, source: F) -> Vec<String>
    where
        F: Fn(&str) -> bool,
    {
        let mut names = Vec::new();
        for statement in self.iter() {
            let Some(module) = import_source(statement) else {
                continue;
            };
            if !source(module) || statement.starts_with("import type") {
                continue;
            }
            let (Some(open), Some(close)) = (statement.find('{'), statement.find('}')) else {
                continue;
            };
            if close < open {
                continue;
            }
            for binding in statement[open + 1..close].split(',') {
                let binding = binding.trim();
                if binding.is_empty() || binding.starts_with("type ") {
                    continue;
                }
                let local = binding
                    .rsplit_once(" as ")
                    .map_or(binding, |(_, alias)| alias)
                    .trim();
                if !local.is_empty() && !names.iter().any(|n| n == local) {
                    names.push(local.to_string());
                }
            }
        }
        names
    }
}

/// Every local name an import statement binds: default, namespace and
/// named bindings alike.
fn local_bindings(statement: &str) -> Vec<&str> {
    let Some((clause, _)) = statement.rsplit_once(" from ") else {
        return Vec::new();
    };
    let clause = clause.trim_start().trim_start_matches("import").trim();
    let clause = clause.strip_prefix("type ").unwrap_or(clause);

    let (outer, named) = match (clause.find('{'), clause.rfind('}')) {
        (Some(open), Some(close)) if open < close => (
            [&clause[..open], &clause[close + 1..]],
            &clause[open + 1..close],
        ),
        _ => ([clause, ""], ""),
    };

    outer
        .into_iter()
        .flat_map(|part| part.split(','))
        .chain(named.split(','))
        .map(str::trim)
        .filter(|binding| !binding.is_empty() && !binding.starts_with("type "))
        .map(|binding| binding.rsplit_once(" as ").map_or(binding, |(_, alias)| alias).trim())
        .filter(|local| !local.is_empty())
        .collect()
}

/// Module specifier of an import statement.
fn import_source(statement: &str) -> Option<&str> {
    let after = statement.rsplit_once(" from ").map(|(_, rest)| rest)?;
    let after = after.trim().trim_end_matches(';').trim();
    let quote = after.chars().next().filter(|c| matches!(c, '"' | '\'' | '`'))?;
    after[1..].split(quote).next()
}

/// Stylesheet text owned by a generation batch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StylesheetText(String);

impl StylesheetText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Rules ready to be inlined into a `<style>` element: `@tailwind`
    /// directives and block comments removed, closing tags neutralized.
    pub fn sanitized_for_inline(&self) -> String {
        let text = CSS_COMMENT.replace_all(&self.0, "");
        let text = TAILWIND_DIRECTIVE.replace_all(&text, "");
        STYLE_CLOSE.replace_all(&text, "<\\/$1").trim().to_string()
    }
}

/// Everything extracted from one model reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extraction {
    pub imports: ImportSet,
    pub stylesheet: Option<StylesheetText>,
    /// Depth-zero code between the imports and the first declaration.
    pub preamble: Option<String>,
    pub components: Vec<ComponentRecord>,
}

impl Extraction {
    /// The explicit result for empty input.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Record at `index`, failing when the batch is empty or too short.
    pub fn get(&self, index: usize) -> Result<&ComponentRecord, ExtractError> {
        if self.components.is_empty() {
            return Err(ExtractError::NoComponents);
        }
        self.components
            .get(index)
            .ok_or(ExtractError::SelectionOutOfRange {
                index,
                len: self.components.len(),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.components
            .iter()
            .map(|c| c.declared_name.as_str())
            .collect()
    }

    /// Standalone module source for the record at `index`.
    pub fn module_for(&self, index: usize) -> Result<String, ExtractError> {
        let record = self.get(index)?;
        Ok(record.to_module(&self.imports, self.preamble.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_set_dedup_preserves_order() {
        let mut imports = ImportSet::new();
        assert!(imports.insert("import * as React from \"react\";"));
        assert!(imports.insert("import { cn } from \"@/lib/utils\";"));
        assert!(!imports.insert("import  * as React from \"react\";"));
        assert!(!imports.insert("import * as React\n  from \"react\";"));

        assert_eq!(imports.len(), 2);
        assert_eq!(
            imports.iter().collect::<Vec<_>>(),
            vec!["import * as React from \"react\";", "import { cn } from \"@/lib/utils\";"]
        );
    }

    #[test]
    fn test_bindings_from_module() {
        let mut imports = ImportSet::new();
        imports.insert("import { X, ChevronRight as Chevron, type LucideIcon } from 'lucide-react';");
        imports.insert("import { Slot } from \"@radix-ui/react-slot\";");

        let icons = imports.bindings_from(|module| module == "lucide-react");
        assert_eq!(icons, vec!["X".to_string(), "Chevron".to_string()]);
    }

    #[test]
    fn test_imports_referenced_by_body() {
        let mut imports = ImportSet::new();
        imports.insert("import * as React from \"react\"");
        imports.insert("import { Mail, Settings as Gear } from \"lucide-react\"");
        imports.insert("import clsx, { type ClassValue } from \"clsx\"");
        imports.insert("import \"./styles.css\"");

        let used = imports.referenced_by("const Icon = () => <Mail size={16} />");
        assert_eq!(used.iter().collect::<Vec<_>>(), vec!["import { Mail, Settings as Gear } from \"lucide-react\""]);

        let used = imports.referenced_by("React.useId(); clsx(\"a\"); <Gear />");
        assert_eq!(used.len(), 3);

        assert!(imports.referenced_by("const ClassValue = 1").is_empty());
    }

    #[test]
    fn test_record_balance() {
        let record = ComponentRecord::new("Button", Role::Button, "const Button = () => {\n  return null\n}");
        assert!(record.is_balanced());

        let truncated = ComponentRecord::new("Button", Role::Button, "const Button = () => {");
        assert_eq!(truncated.delimiter_balance(), 1);
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("export default Button;", "Button"));
        assert!(!contains_word("export { ButtonGroup };", "Button"));
        assert!(!contains_word("anything", ""));
    }

    #[test]
    fn test_to_module_appends_export() {
        let mut imports = ImportSet::new();
        imports.insert("import * as React from \"react\";");
        let record = ComponentRecord::new(
            "Badge",
            Role::Badge,
            "const Badge = () => <span>Badge</span>;",
        );

        insta::assert_snapshot!(record.to_module(&imports, None), @r###"
        import * as React from "react";

        const Badge = () => <span>Badge</span>;

        export { Badge };
        "###);
    }

    #[test]
    fn test_to_module_keeps_existing_export() {
        let record = ComponentRecord::new(
            "Button",
            Role::Button,
            "const Button = () => <button />;\n\nexport default Button;",
        );
        let module = record.to_module(&ImportSet::new(), Some("type Size = \"sm\" | \"lg\";"));

        assert!(module.starts_with("type Size"));
        assert!(module.trim_end().ends_with("export default Button;"));
        assert_eq!(module.matches("export").count(), 1);
    }

    #[test]
    fn test_stylesheet_sanitized_for_inline() {
        let css = StylesheetText::new(
            "@tailwind base;\n@tailwind components;\n/* tokens */\n:root { --radius: 0.5rem; }\n</style>",
        );
        let inline = css.sanitized_for_inline();
        assert!(inline.starts_with(":root"));
        assert!(!inline.contains("@tailwind"));
        assert!(!inline.contains("tokens"));
        assert!(inline.contains(":root { --radius: 0.5rem; }"));
        assert!(inline.contains("<\\/style>"));
    }

    #[test]
    fn test_unterminated_comment_and_uppercase_close() {
        let css = StylesheetText::new(".a { color: red; }\n</STYLE>\n/* never closed\n.b { }");
        assert_eq!(css.sanitized_for_inline(), ".a { color: red; }\n<\\/STYLE>");
    }

    #[test]
    fn test_extraction_get() {
        let empty = Extraction::empty();
        assert_eq!(empty.get(0), Err(ExtractError::NoComponents));

        let extraction = Extraction {
            components: vec![ComponentRecord::new("Card", Role::Card, "const Card = () => {}")],
            ..Extraction::default()
        };
        assert!(extraction.get(0).is_ok());
        assert_eq!(
            extraction.get(3),
            Err(ExtractError::SelectionOutOfRange { index: 3, len: 1 })
        );
    }
}
