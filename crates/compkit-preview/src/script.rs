//! Prepares a component body for evaluation inside the injection scope.
//!
//! The body runs inside a block of the `defineComponents` function, so module
//! syntax has to go: imports are hoisted out, export aggregates dropped and
//! `export` prefixes stripped from declarations.

use crate::symbols::SymbolTable;
use compkit_extract::{hoist_imports, is_export_aggregate, parse_head, DepthTracker, HeadKind, ImportSet};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static EXPORT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)export\s+(?:default\s+)?").unwrap());

static EXPORT_DEFAULT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*export\s+default\s+[A-Za-z_$][\w$]*\s*;?\s*$").unwrap());

static SCRIPT_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</(script)").unwrap());

/// A body ready for injection.
#[derive(Debug, Clone)]
pub struct PreparedBody {
    /// Script text without module syntax.
    pub source: String,
    /// Imports hoisted out of the body.
    pub imports: ImportSet,
    /// Symbols of the body, including any name bound by the rewrite.
    pub table: SymbolTable,
}

/// Strip module syntax from `body`. The first anonymous top-level
/// declaration is bound to `declared_name`, or to a derived name when that
/// one is taken or not a valid identifier.
pub fn prepare(body: &str, declared_name: &str) -> PreparedBody {
    let mut imports = ImportSet::new();
    let hoisted = hoist_imports(body, &mut imports);
    let mut table = SymbolTable::scan(&hoisted);

    let mut bound = None;
    let mut lines = Vec::new();
    let mut tracker = DepthTracker::clamped();
    let mut in_aggregate = false;

    for line in hoisted.lines() {
        let top = tracker.at_top_level();
        tracker.feed(line);

        if in_aggregate {
            in_aggregate = !line.contains('}');
            continue;
        }
        if !top {
            lines.push(line.to_string());
            continue;
        }

        if is_export_aggregate(line) {
            in_aggregate = line.contains('{') && !line.contains('}');
            continue;
        }
        if EXPORT_DEFAULT_NAME.is_match(line) {
            continue;
        }

        let stripped = EXPORT_PREFIX.replace(line, "$1").into_owned();
        let anonymous = parse_head(line).is_some_and(|head| head.kind == HeadKind::Anonymous);
        if anonymous && bound.is_none() {
            let name = binding_name(declared_name, &table);
            let indent = &stripped[..stripped.len() - stripped.trim_start().len()];
            lines.push(format!("{indent}const {name} = {}", stripped.trim_start()));
            table.bind(&name);
            bound = Some(name);
            continue;
        }
        lines.push(stripped);
    }

    if let Some(name) = &bound {
        debug!(name = %name, "bound anonymous declaration");
    }

    PreparedBody {
        source: escape_script(&lines.join("\n")),
        imports,
        table,
    }
}

fn binding_name(declared_name: &str, table: &SymbolTable) -> String {
    let base = if is_identifier(declared_name) {
        declared_name
    } else {
        "DefaultExport"
    };
    if !table.declares(base) {
        return base.to_string();
    }
    let mut suffix = 1;
    loop {
        let candidate = format!("{base}Default{}", if suffix == 1 { String::new() } else { suffix.to_string() });
        if !table.declares(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Keep a script element open however its content spells `</script`.
pub fn escape_script(source: &str) -> String {
    SCRIPT_CLOSE.replace_all(source, "<\\/$1").into_owned()
}
