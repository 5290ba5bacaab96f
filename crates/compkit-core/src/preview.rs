//! Preview documents.

use crate::types::Role;

/// How the synthesizer chose the symbol it mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution {
    /// The record's declared name is defined by its body.
    Declared(String),
    /// First exported component-looking identifier.
    Exported(String),
    /// The role's conventional symbol, defined by the body.
    RoleFallback(String),
    /// Nothing resolvable; the preview shows a "not exported" box for this name.
    Missing(String),
}

impl Resolution {
    pub fn symbol(&self) -> &str {
        match self {
            Self::Declared(s) | Self::Exported(s) | Self::RoleFallback(s) | Self::Missing(s) => s,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }
}

/// A self-contained HTML document that renders one component.
///
/// Built fresh for every selection or code change and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreviewDocument {
    pub html: String,
    pub role: Role,
    pub mounted: Resolution,
    /// Names of the stand-in primitives injected for this render.
    pub stand_ins: Vec<String>,
}

impl PreviewDocument {
    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    pub fn is_placeholder(&self) -> bool {
        self.mounted.is_missing()
    }

    /// Whether a stand-in with this name was injected.
    pub fn injected(&self, name: &str) -> bool {
        self.stand_ins.iter().any(|s| s == name)
    }
}
