//! Detection of a stylesheet emitted ahead of the component code.

use crate::declarations::{is_import_line, parse_head};
use crate::scanner::{find_block_end, BlockEnd};
use compkit_core::StylesheetText;
use tracing::debug;

/// Words that mark a span as script rather than CSS.
const SCRIPT_MARKERS: &[&str] = &["=>", "return", "function", "export ", "const ", "React"];

/// Split a leading stylesheet off the reply.
///
/// The span before the first import line is a stylesheet when it consists
/// only of closed brace blocks and standalone at-rules, and mentions no
/// script keyword. Returns the stylesheet and the line scanning resumes at.
pub fn separate_stylesheet(lines: &[&str]) -> (Option<StylesheetText>, usize) {
    let Some(first_import) = lines.iter().position(|line| is_import_line(line)) else {
        return (None, 0);
    };

    let lead = &lines[..first_import];
    if lead.iter().all(|line| line.trim().is_empty()) {
        return (None, 0);
    }
    if !is_reference_free(lead) || !is_brace_delimited(lead) {
        return (None, 0);
    }

    let css = lead.join("\n").trim().to_string();
    debug!(lines = first_import, "separated leading stylesheet");
    (Some(StylesheetText::new(css)), first_import)
}

fn is_reference_free(lead: &[&str]) -> bool {
    lead.iter().all(|line| {
        let t = line.trim();
        if t.starts_with('@') {
            // `@import url(...)` is a CSS at-rule, not a module import.
            return true;
        }
        parse_head(t).is_none() && !SCRIPT_MARKERS.iter().any(|m| t.contains(m))
    })
}

/// Walk the span block by block; every block must close inside it.
fn is_brace_delimited(lead: &[&str]) -> bool {
    let mut index = 0;
    let mut blocks = 0;

    while index < lead.len() {
        let t = lead[index].trim();
        if t.is_empty() || (t.starts_with('@') && t.ends_with(';')) {
            index += 1;
            continue;
        }
        match find_block_end(lead, index) {
            BlockEnd::Closed(end) => {
                blocks += 1;
                index = end + 1;
            }
            BlockEnd::Unterminated { .. } => return false,
        }
    }

    blocks > 0
}
