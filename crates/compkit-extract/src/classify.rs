//! Role classification for extracted declarations.

use compkit_core::Role;

/// A markup pattern that suggests a role.
#[derive(Debug, Clone, Copy)]
enum MarkupRule {
    /// Any of the needles appears.
    Any(&'static [&'static str]),
    /// Every needle appears.
    All(&'static [&'static str]),
}

impl MarkupRule {
    fn matches(&self, haystack: &str) -> bool {
        match self {
            Self::Any(needles) => needles.iter().any(|n| haystack.contains(n)),
            Self::All(needles) => needles.iter().all(|n| haystack.contains(n)),
        }
    }
}

/// Maps a declaration's name and body to a [`Role`].
///
/// Name hints win over markup inference. Both use case-insensitive
/// substring matching and the first matching entry wins.
pub struct RoleDetector {
    /// Identifier fragments that name a role.
    name_keywords: Vec<(Role, Vec<&'static str>)>,
    /// Markup patterns, in priority order.
    markup_rules: Vec<(Role, MarkupRule)>,
}

impl RoleDetector {
    /// Create a new role detector.
    pub fn new() -> Self {
        Self {
            name_keywords: vec![
                (Role::Button, vec!["button", "btn"]),
                (Role::Textarea, vec!["textarea"]),
                (Role::Input, vec!["input", "textfield"]),
                (Role::Navbar, vec!["navbar", "nav", "topbar"]),
                (Role::Modal, vec!["modal", "dialog", "popup"]),
                (Role::Badge, vec!["badge", "chip", "pill"]),
                (Role::Card, vec!["card", "tile"]),
                (Role::Table, vec!["table", "datagrid"]),
            ],
            markup_rules: vec![
                (
                    Role::Table,
                    MarkupRule::Any(&["<table", "<thead", "<tbody", "<tfoot", "<tr>", "<tr ", "<td", "<th>", "<th "]),
                ),
                (Role::Modal, MarkupRule::Any(&["modal", "dialog"])),
                (Role::Navbar, MarkupRule::Any(&["<nav", "<header"])),
                (Role::Card, MarkupRule::Any(&["card"])),
                (Role::Button, MarkupRule::Any(&["<button"])),
                (Role::Textarea, MarkupRule::Any(&["<textarea"])),
                (Role::Input, MarkupRule::Any(&["<input"])),
                (Role::Badge, MarkupRule::All(&["<span", "badge"])),
                (Role::Card, MarkupRule::All(&["<div", "rounded"])),
            ],
        }
    }

    /// Classify a declaration. Never fails; unmatched input is `Component`.
    pub fn classify(&self, name: Option<&str>, body: &str) -> Role {
        name.and_then(|name| self.role_from_name(name))
            .or_else(|| self.role_from_markup(body))
            .unwrap_or(Role::Component)
    }

    /// Role named by an identifier, if any.
    pub fn role_from_name(&self, name: &str) -> Option<Role> {
        let name_lower = name.to_lowercase();

        self.name_keywords
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| name_lower.contains(k)))
            .map(|(role, _)| *role)
    }

    /// Role inferred from characteristic markup.
    pub fn role_from_markup(&self, body: &str) -> Option<Role> {
        let body_lower = body.to_lowercase();

        self.markup_rules
            .iter()
            .find(|(_, rule)| rule.matches(&body_lower))
            .map(|(role, _)| *role)
    }
}

impl Default for RoleDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_hint_wins_over_markup() {
        let detector = RoleDetector::new();
        let body = "const SubmitButton = () => <table><tr><td>x</td></tr></table>";
        assert_eq!(detector.classify(Some("SubmitButton"), body), Role::Button);
    }

    #[test]
    fn test_generic_name_with_table_markup() {
        let detector = RoleDetector::new();
        let body = "const Widget = () => (\n  <table className=\"w-full\">\n    <tbody />\n  </table>\n)";
        assert_eq!(detector.classify(Some("Widget"), body), Role::Table);
    }

    #[test]
    fn test_markup_inference() {
        let detector = RoleDetector::new();
        assert_eq!(detector.classify(None, "<button>Go</button>"), Role::Button);
        assert_eq!(detector.classify(None, "<TEXTAREA rows={3} />"), Role::Textarea);
        assert_eq!(detector.classify(None, "<input placeholder=\"x\" />"), Role::Input);
        assert_eq!(detector.classify(None, "<header><nav /></header>"), Role::Navbar);
        assert_eq!(detector.classify(None, "<div role=\"dialog\" />"), Role::Modal);
        assert_eq!(detector.classify(None, "<span className=\"badge\">New</span>"), Role::Badge);
        assert_eq!(detector.classify(None, "<div className=\"rounded-lg p-6\" />"), Role::Card);
    }

    #[test]
    fn test_unmatched_is_component() {
        let detector = RoleDetector::new();
        assert_eq!(detector.classify(Some("Widget"), "<p>hello</p>"), Role::Component);
        assert_eq!(detector.classify(None, ""), Role::Component);
    }

    #[test]
    fn test_sub_parts_follow_their_family() {
        let detector = RoleDetector::new();
        assert_eq!(detector.role_from_name("CardHeader"), Some(Role::Card));
        assert_eq!(detector.role_from_name("DialogContent"), Some(Role::Modal));
        assert_eq!(detector.role_from_name("TableRow"), Some(Role::Table));
        assert_eq!(detector.role_from_name("buttonVariants"), Some(Role::Button));
        assert_eq!(detector.role_from_name("Textarea"), Some(Role::Textarea));
    }
}
