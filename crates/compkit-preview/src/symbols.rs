//! What a component body defines, exports and references.

use compkit_core::contains_word;
use compkit_extract::{is_export_aggregate, parse_head, DepthTracker, HeadKind};
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

/// `const { a, b: c } = …` destructuring declarations.
static DESTRUCTURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:export\s+)?(?:const|let|var)\s*\{([^}]*)\}\s*=").unwrap());

/// `export default Name` with nothing else on the line.
static EXPORT_DEFAULT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*export\s+default\s+([A-Za-z_$][\w$]*)\s*;?\s*$").unwrap());

/// Capitalized JSX tag names; a preceding identifier character or `.` means
/// a type argument, not a tag.
static JSX_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|[^\w$.])<([A-Z][\w$]*)").unwrap());

/// `Name.Member` with a capitalized member.
static NAMESPACE_USE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z][\w$]*)\.[A-Z]").unwrap());

/// Symbols of one component body.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    /// Declared at depth zero, in source order.
    top_level: IndexSet<String>,
    /// Declared at any depth.
    declared: IndexSet<String>,
    /// Named by an export statement, in source order.
    exported: IndexSet<String>,
    /// Capitalized JSX tags, first segment only.
    jsx_tags: IndexSet<String>,
    /// Capitalized identifiers used as `Name.Member`.
    namespaces: IndexSet<String>,
    body: String,
}

impl SymbolTable {
    /// Scan a body.
    pub fn scan(body: &str) -> Self {
        let mut table = Self {
            body: body.to_string(),
            ..Self::default()
        };
        let mut tracker = DepthTracker::clamped();
        let mut aggregate: Option<String> = None;

        for line in body.lines() {
            let top = tracker.at_top_level();
            tracker.feed(line);

            if let Some(pending) = aggregate.as_mut() {
                pending.push(' ');
                pending.push_str(line);
                if line.contains('}') {
                    let statement = aggregate.take().unwrap_or_default();
                    table.add_aggregate(&statement);
                }
                continue;
            }

            // Types have no runtime value to mount or return.
            if let Some(head) = parse_head(line).filter(|head| head.kind != HeadKind::TypeOnly) {
                if let Some(name) = head.name {
                    table.declared.insert(name.to_string());
                    if top {
                        table.top_level.insert(name.to_string());
                        if head.exported {
                            table.exported.insert(name.to_string());
                        }
                    }
                }
            }

            if let Some(caps) = DESTRUCTURE.captures(line) {
                for name in destructured_names(&caps[1]) {
                    table.declared.insert(name.clone());
                    if top {
                        table.top_level.insert(name);
                    }
                }
            }

            if top && is_export_aggregate(line) {
                if line.contains('}') || !line.contains('{') {
                    table.add_aggregate(line);
                } else {
                    aggregate = Some(line.to_string());
                }
            } else if let Some(caps) = EXPORT_DEFAULT_NAME.captures(line) {
                table.exported.insert(caps[1].to_string());
            }
        }

        for caps in JSX_TAG.captures_iter(body) {
            table.jsx_tags.insert(caps[1].to_string());
        }
        for caps in NAMESPACE_USE.captures_iter(body) {
            table.namespaces.insert(caps[1].to_string());
        }

        table
    }

    fn add_aggregate(&mut self, statement: &str) {
        // Re-exports from another module are not defined here.
        if statement.contains(" from ") {
            return;
        }
        let (Some(open), Some(close)) = (statement.find('{'), statement.rfind('}')) else {
            return;
        };
        if close < open {
            return;
        }
        if statement.trim_start().starts_with("export type") {
            return;
        }
        for entry in statement[open + 1..close].split(',') {
            let entry = entry.trim();
            if entry.starts_with("type ") {
                continue;
            }
            let local = entry.split(" as ").next().unwrap_or(entry).trim();
            if !local.is_empty() && local != "default" {
                self.exported.insert(local.to_string());
            }
        }
    }

    /// Whether the body declares `name` at depth zero.
    pub fn defines(&self, name: &str) -> bool {
        self.top_level.contains(name)
    }

    /// Whether the body declares `name` anywhere.
    pub fn declares(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    /// Whether the body mentions `name` as a whole word.
    pub fn references(&self, name: &str) -> bool {
        contains_word(&self.body, name)
    }

    pub fn top_level(&self) -> impl Iterator<Item = &str> {
        self.top_level.iter().map(String::as_str)
    }

    pub fn exported(&self) -> impl Iterator<Item = &str> {
        self.exported.iter().map(String::as_str)
    }

    pub fn jsx_tags(&self) -> impl Iterator<Item = &str> {
        self.jsx_tags.iter().map(String::as_str)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(String::as_str)
    }

    /// Bind a name the script rewrite declares on the body's behalf.
    pub fn bind(&mut self, name: &str) {
        self.top_level.insert(name.to_string());
        self.declared.insert(name.to_string());
    }
}

/// Local names bound by the inside of a destructuring pattern.
fn destructured_names(pattern: &str) -> Vec<String> {
    pattern
        .split(',')
        .filter_map(|entry| {
            let entry = entry.trim().trim_start_matches("...");
            let local = entry.rsplit_once(':').map_or(entry, |(_, alias)| alias);
            let local = local.split('=').next().unwrap_or(local).trim();
            let valid = local
                .chars()
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
                && local.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$');
            valid.then(|| local.to_string())
        })
        .collect()
}

/// A capitalized identifier that is not a `<Base>Variants` helper.
pub fn looks_like_component(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase()) && !name.to_lowercase().ends_with("variants")
}
