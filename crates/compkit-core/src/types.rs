//! Component roles.

use crate::errors::ParseRoleError;
use std::fmt;
use std::str::FromStr;

/// Advisory category assigned to an extracted component.
///
/// The role drives preview example selection and default naming. It is
/// derived from heuristics and may be wrong for unusual code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Button,
    Input,
    Textarea,
    Navbar,
    Modal,
    Badge,
    Card,
    Table,
    Component,
}

impl Role {
    /// Every role, `Component` last.
    pub const ALL: [Role; 9] = [
        Role::Button,
        Role::Input,
        Role::Textarea,
        Role::Navbar,
        Role::Modal,
        Role::Badge,
        Role::Card,
        Role::Table,
        Role::Component,
    ];

    /// Display name, also used as the default component name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "Button",
            Self::Input => "Input",
            Self::Textarea => "Textarea",
            Self::Navbar => "Navbar",
            Self::Modal => "Modal",
            Self::Badge => "Badge",
            Self::Card => "Card",
            Self::Table => "Table",
            Self::Component => "Component",
        }
    }

    /// Symbols a component library conventionally exports for this role,
    /// most specific first.
    pub fn canonical_symbols(&self) -> &'static [&'static str] {
        match self {
            Self::Button => &["Button"],
            Self::Input => &["Input"],
            Self::Textarea => &["Textarea", "TextArea"],
            Self::Navbar => &["Navbar", "NavBar", "Nav", "Navigation", "Header"],
            Self::Modal => &["Dialog", "Modal"],
            Self::Badge => &["Badge"],
            Self::Card => &["Card"],
            Self::Table => &["Table"],
            Self::Component => &[],
        }
    }

    /// Whether `name` is this role's name or one of its canonical symbols.
    pub fn is_canonical_name(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(self.as_str())
            || self
                .canonical_symbols()
                .iter()
                .any(|symbol| symbol.eq_ignore_ascii_case(name))
    }

    /// Look up a role by its name or a canonical alias, ignoring case.
    pub fn from_name(name: &str) -> Option<Role> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.is_canonical_name(name))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_name(s).ok_or_else(|| ParseRoleError(s.to_string()))
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Component
    }
}
