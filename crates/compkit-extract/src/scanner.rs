//! Brace-depth scanning.
//!
//! Braces inside strings, template literals and comments are counted like
//! any other brace. The scanner never fails: unbalanced input runs to the
//! end of the text and the caller keeps whatever it accumulated.

/// Opening and closing brace counts for one line.
pub fn brace_counts(line: &str) -> (usize, usize) {
    line.chars().fold((0, 0), |(open, close), c| match c {
        '{' => (open + 1, close),
        '}' => (open, close + 1),
        _ => (open, close),
    })
}

/// Where the block opened at or after a start line closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEnd {
    /// Index of the line on which the counter returned to zero.
    Closed(usize),
    /// The text ended first; `depth` is the counter at end of text.
    Unterminated { last_line: usize, depth: i64 },
}

impl BlockEnd {
    /// Last line that belongs to the block either way.
    pub fn last_line(&self) -> usize {
        match *self {
            Self::Closed(line) => line,
            Self::Unterminated { last_line, .. } => last_line,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed(_))
    }
}

/// Find the line on which the outermost block opened on or after `start`
/// closes.
///
/// The block ends on the first line where the counter is back at zero after
/// the line is processed and the line holds at least one closing brace.
pub fn find_block_end(lines: &[&str], start: usize) -> BlockEnd {
    let mut depth: i64 = 0;

    for (index, line) in lines.iter().enumerate().skip(start) {
        let (open, close) = brace_counts(line);
        depth += open as i64;
        depth -= close as i64;

        if depth == 0 && close > 0 {
            return BlockEnd::Closed(index);
        }
    }

    BlockEnd::Unterminated {
        last_line: lines.len().saturating_sub(1).max(start),
        depth,
    }
}

/// Running brace depth across a sequence of lines.
#[derive(Debug, Clone, Default)]
pub struct DepthTracker {
    depth: i64,
    clamp: bool,
}

impl DepthTracker {
    /// A signed tracker that lets stray closers drive the depth negative.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracker that never goes below zero, so a stray closer in prose
    /// does not hide every later declaration.
    pub fn clamped() -> Self {
        Self {
            depth: 0,
            clamp: true,
        }
    }

    pub fn depth(&self) -> i64 {
        self.depth
    }

    pub fn at_top_level(&self) -> bool {
        self.depth == 0
    }

    /// Process one line, character by character.
    pub fn feed(&mut self, line: &str) {
        for c in line.chars() {
            match c {
                '{' => self.depth += 1,
                '}' => {
                    self.depth -= 1;
                    if self.clamp && self.depth < 0 {
                        self.depth = 0;
                    }
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_end_simple() {
        let lines = vec![
            "const Button = () => {",
            "  return (",
            "    <button className={cn(\"px-4\")}>Go</button>",
            "  )",
            "}",
            "",
            "export default Button;",
        ];
        assert_eq!(find_block_end(&lines, 0), BlockEnd::Closed(4));
    }

    #[test]
    fn test_block_end_skips_lines_without_closer() {
        let lines = vec!["const a = 1;", "function f() {", "}"];
        assert_eq!(find_block_end(&lines, 0), BlockEnd::Closed(2));
    }

    #[test]
    fn test_block_end_unterminated() {
        let lines = vec!["const Card = () => {", "  return <div />"];
        let end = find_block_end(&lines, 0);
        assert_eq!(
            end,
            BlockEnd::Unterminated {
                last_line: 1,
                depth: 1
            }
        );
        assert_eq!(end.last_line(), 1);
        assert!(!end.is_closed());
    }

    #[test]
    fn test_block_end_counts_braces_in_strings() {
        // The brace inside the string keeps the block open.
        let lines = vec!["const s = () => {", "  return \"{\"", "}"];
        assert!(!find_block_end(&lines, 0).is_closed());
    }

    #[test]
    fn test_tracker_reports_top_level() {
        let mut tracker = DepthTracker::new();
        assert!(tracker.at_top_level());
        tracker.feed("function A() {");
        assert_eq!(tracker.depth(), 1);
        tracker.feed("  if (x) { y() }");
        assert!(!tracker.at_top_level());
        tracker.feed("}");
        assert!(tracker.at_top_level());
    }

    #[test]
    fn test_clamped_tracker_ignores_stray_closer() {
        let mut signed = DepthTracker::new();
        signed.feed("}");
        assert_eq!(signed.depth(), -1);

        let mut clamped = DepthTracker::clamped();
        clamped.feed("}");
        assert!(clamped.at_top_level());
    }
}
