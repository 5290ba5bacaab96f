//! Component extraction from a model reply.
//!
//! The reply is cleaned, a leading stylesheet is split off, and the rest is
//! walked line by line. A declaration starts wherever a recognized head
//! appears at brace depth zero and runs until the next one. Helper
//! declarations are folded into their owners and declarations that share a
//! role are merged into one record.

use crate::classify::RoleDetector;
use crate::declarations::{
    import_is_complete, is_directive, is_export_aggregate, is_import_line, parse_head, variant_base, HeadKind,
};
use crate::options::ExtractOptions;
use crate::sanitize::sanitize;
use crate::scanner::{brace_counts, find_block_end, DepthTracker};
use crate::stylesheet::separate_stylesheet;
use compkit_core::{ComponentRecord, Extraction, ImportSet, Role, StylesheetText};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace, warn};

/// Upper bound on the lines one import statement may span.
const MAX_IMPORT_LINES: usize = 32;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z_$][A-Za-z0-9_$]*").unwrap());

static CALL_STATEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][\w$]*(\.[A-Za-z_$][\w$]*)*\s*[(<]").unwrap());

const KEYWORDS: &[&str] = &[
    "import", "export", "default", "from", "const", "let", "var", "function", "return", "class", "new",
    "if", "else", "this", "true", "false", "null", "undefined", "type", "interface", "async", "await",
];

/// Lines between one declaration head and the next.
#[derive(Debug)]
struct Segment<'a> {
    name: Option<String>,
    lines: Vec<&'a str>,
}

/// Result of the top-level walk.
#[derive(Debug, Default)]
struct Scan<'a> {
    imports: ImportSet,
    /// Depth-zero code before the first declaration.
    preamble: Vec<&'a str>,
    segments: Vec<Segment<'a>>,
    /// Every non-import line before the first declaration, prose included.
    leading: Vec<&'a str>,
}

/// A classified top-level declaration.
#[derive(Debug, Clone)]
struct Declaration {
    name: String,
    anonymous: bool,
    role: Role,
    body: String,
}

/// Declarations that end up in one record.
#[derive(Debug)]
struct Group {
    owner: usize,
    members: Vec<usize>,
}

/// Turns reply text into component records.
pub struct Extractor {
    options: ExtractOptions,
    detector: RoleDetector,
}

impl Extractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::with_options(ExtractOptions::default())
    }

    pub fn with_options(options: ExtractOptions) -> Self {
        Self {
            options,
            detector: RoleDetector::new(),
        }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    pub fn detector(&self) -> &RoleDetector {
        &self.detector
    }

    /// Extract every component from `reply`.
    ///
    /// Returns [`Extraction::empty`] for blank input and at least one record
    /// for anything else.
    pub fn extract(&self, reply: &str) -> Extraction {
        if reply.trim().is_empty() {
            debug!("blank reply, nothing to extract");
            return Extraction::empty();
        }

        let cleaned = if self.options.sanitize {
            sanitize(reply)
        } else {
            reply.trim().to_string()
        };
        let text = if cleaned.is_empty() { reply.trim() } else { cleaned.as_str() };

        let lines: Vec<&str> = text.lines().collect();
        let (stylesheet, resume) = separate_stylesheet(&lines);
        let scan = scan_top_level(&lines[resume..], &self.options.variant_suffix);

        if scan.segments.is_empty() {
            return self.fallback(text, scan, stylesheet);
        }

        let preamble = join_trimmed(&scan.preamble);
        let declarations = self.classify_segments(scan.segments);
        let groups = self.group(&declarations);

        let components = groups
            .iter()
            .map(|group| build_record(&declarations, group).with_imports_from(&scan.imports))
            .collect::<Vec<_>>();

        debug!(
            components = components.len(),
            imports = scan.imports.len(),
            stylesheet = stylesheet.is_some(),
            "extracted components"
        );

        Extraction {
            imports: scan.imports,
            stylesheet,
            preamble,
            components,
        }
    }

    /// Wrap the reply as one `Component` record.
    fn fallback(&self, text: &str, scan: Scan<'_>, stylesheet: Option<StylesheetText>) -> Extraction {
        let body = join_trimmed(&scan.leading).unwrap_or_else(|| text.trim().to_string());
        let name = first_identifier(&body).unwrap_or_else(|| self.options.fallback_name.clone());

        warn!(%name, "no top-level declarations found, wrapping reply as a single component");
        let record = ComponentRecord::new(name, Role::Component, body).with_imports_from(&scan.imports);

        Extraction {
            imports: scan.imports,
            stylesheet,
            preamble: None,
            components: vec![record],
        }
    }

    fn classify_segments(&self, segments: Vec<Segment<'_>>) -> Vec<Declaration> {
        let last = segments.len().saturating_sub(1);

        segments
            .into_iter()
            .enumerate()
            .map(|(index, segment)| {
                let body = settle_body(segment.lines, index == last);
                let role = self.detector.classify(segment.name.as_deref(), &body);
                let anonymous = segment.name.is_none();
                let name = segment.name.unwrap_or_else(|| role.as_str().to_string());
                trace!(%name, %role, anonymous, "classified declaration");
                Declaration {
                    name,
                    anonymous,
                    role,
                    body,
                }
            })
            .collect()
    }

    /// Fold helpers into their owners, then merge records sharing a role.
    fn group(&self, decls: &[Declaration]) -> Vec<Group> {
        let suffix = self.options.variant_suffix.as_str();
        let mut owner: Vec<usize> = (0..decls.len()).collect();

        for (index, decl) in decls.iter().enumerate() {
            if decl.anonymous {
                continue;
            }
            let Some(base) = variant_base(&decl.name, suffix) else {
                continue;
            };
            let target = decls.iter().position(|d| {
                !d.anonymous && d.name.eq_ignore_ascii_case(base) && variant_base(&d.name, suffix).is_none()
            });
            match target {
                Some(t) if roles_compatible(decls[t].role, decl.role) => {
                    debug!(helper = %decl.name, owner = %decls[t].name, "folding helper into owner");
                    owner[index] = t;
                }
                Some(t) => {
                    debug!(
                        helper = %decl.name,
                        owner = %decls[t].name,
                        "helper role differs from owner, keeping separate"
                    );
                }
                None => trace!(helper = %decl.name, "helper has no owner"),
            }
        }

        let mut by_owner: IndexMap<usize, Vec<usize>> = IndexMap::new();
        for (index, &o) in owner.iter().enumerate() {
            by_owner.entry(o).or_default().push(index);
        }
        let groups = by_owner
            .into_iter()
            .map(|(owner, members)| Group { owner, members })
            .collect::<Vec<_>>();

        if self.options.merge_by_role {
            merge_by_role(decls, groups)
        } else {
            groups
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// A helper folds into an owner of the same role, or when its own content
/// was too generic to classify.
fn roles_compatible(owner: Role, helper: Role) -> bool {
    owner == helper || helper == Role::Component
}

fn merge_by_role(decls: &[Declaration], groups: Vec<Group>) -> Vec<Group> {
    let mut merged: Vec<Group> = Vec::with_capacity(groups.len());

    for group in groups {
        let owner = &decls[group.owner];
        let mergeable = owner.role != Role::Component && !owner.anonymous;
        let target = mergeable
            .then(|| {
                merged.iter().position(|existing| {
                    let other = &decls[existing.owner];
                    other.role == owner.role && !other.anonymous && !names_collide(decls, existing, &group)
                })
            })
            .flatten();

        match target {
            Some(t) => {
                let existing = &mut merged[t];
                debug!(
                    into = %decls[existing.owner].name,
                    from = %owner.name,
                    role = %owner.role,
                    "merging declarations that share a role"
                );
                let current_canonical = owner.role.is_canonical_name(&decls[existing.owner].name);
                if !current_canonical && owner.role.is_canonical_name(&owner.name) {
                    existing.owner = group.owner;
                }
                existing.members.extend(group.members);
                existing.members.sort_unstable();
            }
            None => merged.push(group),
        }
    }

    merged
}

fn names_collide(decls: &[Declaration], a: &Group, b: &Group) -> bool {
    a.members
        .iter()
        .any(|&i| b.members.iter().any(|&j| decls[i].name == decls[j].name))
}

fn build_record(decls: &[Declaration], group: &Group) -> ComponentRecord {
    let owner = &decls[group.owner];
    let body = group
        .members
        .iter()
        .map(|&i| decls[i].body.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    let auxiliary = group
        .members
        .iter()
        .filter(|&&i| i != group.owner)
        .map(|&i| decls[i].name.clone());

    ComponentRecord::new(owner.name.clone(), owner.role, body).with_auxiliary(auxiliary)
}

/// Walk the lines, tracking brace depth, and cut them into declaration
/// segments. Imports are hoisted wherever they appear at depth zero.
fn scan_top_level<'a>(lines: &[&'a str], variant_suffix: &str) -> Scan<'a> {
    let mut tracker = DepthTracker::clamped();
    let mut scan = Scan::default();
    let mut previous: Option<&str> = None;
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        let top = tracker.at_top_level();
        let continuation = previous.is_some_and(continues_expression);
        previous = (!line.trim().is_empty()).then_some(line);

        if top && is_import_line(line) {
            let (statement, end) = take_import(lines, index);
            for l in &lines[index..=end] {
                tracker.feed(l);
            }
            scan.imports.insert(&statement);
            index = end + 1;
            continue;
        }

        if top && is_directive(line) {
            index += 1;
            continue;
        }

        if top && !continuation {
            if let Some(head) = parse_head(line) {
                if head.opens_declaration(variant_suffix) {
                    trace!(line = index, name = ?head.name, "declaration head");
                    tracker.feed(line);
                    scan.segments.push(Segment {
                        name: head.name.map(str::to_string),
                        lines: vec![line],
                    });
                    index += 1;
                    continue;
                }

                if scan.segments.is_empty() {
                    let end = if head.kind == HeadKind::TypeOnly && line.contains('{') {
                        find_block_end(lines, index).last_line()
                    } else {
                        statement_end(lines, index)
                    };
                    trace!(line = index, name = ?head.name, "preamble declaration");
                    for l in &lines[index..=end] {
                        tracker.feed(l);
                        scan.preamble.push(*l);
                        scan.leading.push(*l);
                    }
                    index = end + 1;
                    continue;
                }
            }
        }

        tracker.feed(line);
        match scan.segments.last_mut() {
            Some(segment) => segment.lines.push(line),
            None => {
                if top && !continuation && is_code_statement(line) {
                    scan.preamble.push(line);
                }
                scan.leading.push(line);
            }
        }
        index += 1;
    }

    scan
}

/// Whether the next line continues the expression `line` leaves open,
/// as with `forwardRef(` followed by the render callback.
fn continues_expression(line: &str) -> bool {
    let t = line.trim_end();
    ["(", ",", "=", "=>", "&&", "||"]
        .iter()
        .any(|tail| t.ends_with(tail))
}

/// Last line of a depth-zero statement that starts at `start`, following
/// `()`, `[]` and `{}` nesting and lines that continue the expression.
fn statement_end(lines: &[&str], start: usize) -> usize {
    let mut depth: i64 = 0;

    for (offset, line) in lines[start..].iter().enumerate() {
        depth = (depth + nesting_delta(line).0).max(0);
        let next = lines[start + offset + 1..].iter().find(|l| !l.trim().is_empty());
        let continued = continues_expression(line) || next.is_some_and(|n| continues_on_next(n));
        if depth == 0 && !continued {
            return start + offset;
        }
    }

    lines.len().saturating_sub(1).max(start)
}

/// Lines that carry on the statement above them.
fn continues_on_next(line: &str) -> bool {
    let t = line.trim_start();
    ["extends ", "implements ", "|", "&", ".", "?", ":"]
        .iter()
        .any(|lead| t.starts_with(lead))
}

/// Collect an import statement that may span several lines.
fn take_import(lines: &[&str], start: usize) -> (String, usize) {
    let mut statement = lines[start].to_string();
    let mut end = start;

    while !import_is_complete(&statement) && end + 1 < lines.len() && end - start < MAX_IMPORT_LINES {
        end += 1;
        statement.push('\n');
        statement.push_str(lines[end]);
    }

    (statement, end)
}

/// Remove import lines and directives from `source`, adding the imports
/// to `imports`. Returns the remaining text.
pub fn hoist_imports(source: &str, imports: &mut ImportSet) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let mut kept = Vec::with_capacity(lines.len());
    let mut tracker = DepthTracker::clamped();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        if tracker.at_top_level() && is_import_line(line) {
            let (statement, end) = take_import(&lines, index);
            for l in &lines[index..=end] {
                tracker.feed(l);
            }
            imports.insert(&statement);
            index = end + 1;
            continue;
        }
        if tracker.at_top_level() && is_directive(line) {
            index += 1;
            continue;
        }
        tracker.feed(line);
        kept.push(line);
        index += 1;
    }

    kept.join("\n").trim().to_string()
}

/// Final body text for one segment.
fn settle_body(mut lines: Vec<&str>, is_last: bool) -> String {
    if is_last {
        strip_trailing_aggregate(&mut lines);
    }
    trim_trailing_prose(&mut lines);
    lines.join("\n").trim_end().to_string()
}

fn pop_blank(lines: &mut Vec<&str>) {
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
}

/// Drop an `export { … }` aggregation that ends the reply.
fn strip_trailing_aggregate(lines: &mut Vec<&str>) {
    pop_blank(lines);

    let Some(start) = lines.iter().rposition(|l| is_export_aggregate(l)) else {
        return;
    };
    // The head line always stays.
    if start == 0 {
        return;
    }

    let tail = lines[start..].join("\n");
    let (open, close) = brace_counts(&tail);
    let tail_end = tail.trim_end().trim_end_matches(';').trim_end();
    let is_whole_statement = tail_end.ends_with('}') || tail_end.ends_with('"') || tail_end.ends_with('\'');

    if open == close && is_whole_statement {
        trace!(statement = %tail.trim(), "stripping trailing export aggregation");
        lines.truncate(start);
        pop_blank(lines);
    }
}

/// Nesting change for one line across `()`, `[]` and `{}`.
fn nesting_delta(line: &str) -> (i64, usize) {
    line.chars().fold((0, 0), |(delta, closers), c| match c {
        '(' | '[' | '{' => (delta + 1, closers),
        ')' | ']' | '}' => (delta - 1, closers + 1),
        _ => (delta, closers),
    })
}

/// Drop prose a model appends after a declaration.
///
/// Everything up to the last line that brings nesting back to zero stays.
/// A balanced line only counts when it closes nesting opened above it or
/// reads as code, so prose with parentheses does not. After it, only lines
/// that read as code statements are kept. A segment that never settles is
/// left alone.
fn trim_trailing_prose(lines: &mut Vec<&str>) {
    let mut depth: i64 = 0;
    let mut settled = 0;

    for (index, line) in lines.iter().enumerate() {
        let before = depth;
        let (delta, closers) = nesting_delta(line);
        depth = (depth + delta).max(0);
        if depth == 0 && (index == 0 || (closers > 0 && (before > 0 || is_code_statement(line)))) {
            settled = index;
        }
    }

    if depth == 0 && settled + 1 < lines.len() {
        let tail = lines
            .split_off(settled + 1)
            .into_iter()
            .filter(|l| l.trim().is_empty() || is_code_statement(l));
        lines.extend(tail);
    }

    pop_blank(lines);
}

fn is_code_statement(line: &str) -> bool {
    let t = line.trim();
    !t.is_empty()
        && (t.starts_with("export")
            || t.ends_with(';')
            || t.contains('=')
            || t.starts_with('<')
            || t.chars().all(|c| matches!(c, ')' | ']' | '}' | ';' | ','))
            || CALL_STATEMENT.is_match(t))
}

fn join_trimmed(lines: &[&str]) -> Option<String> {
    let joined = lines.join("\n");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// First identifier-looking token that is not a keyword.
fn first_identifier(text: &str) -> Option<String> {
    IDENTIFIER
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|word| !KEYWORDS.contains(word))
        .map(str::to_string)
}
