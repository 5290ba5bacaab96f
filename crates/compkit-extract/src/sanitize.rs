//! Cleanup of raw model replies before scanning.

use once_cell::sync::Lazy;
use regex::Regex;

/// Reasoning blocks some models emit before the answer.
static THINK_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<think>.*?</think>").unwrap());

/// Markdown fence lines, with or without a language tag.
static FENCE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*```[A-Za-z0-9_+.-]*[ \t]*\r?$\n?").unwrap());

static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// Whole-line `//` comments only, so URLs inside strings survive.
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*//.*\r?$\n?").unwrap());

static EXCESS_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*\n([ \t]*\n)+").unwrap());

/// Strip reasoning blocks, code fences and comments, then trim.
pub fn sanitize(reply: &str) -> String {
    let text = THINK_BLOCK.replace_all(reply, "");
    let text = FENCE_LINE.replace_all(&text, "");
    let text = BLOCK_COMMENT.replace_all(&text, "");
    let text = LINE_COMMENT.replace_all(&text, "");
    let text = EXCESS_BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}
