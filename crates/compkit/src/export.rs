//! Standalone files for a batch.
//!
//! Each record becomes `components/<Name>.tsx` holding the batch imports,
//! the shared preamble and the record's body. A short `README.md` names the
//! library. Packaging the files into an archive is left to the caller.

use crate::error::Result;
use compkit_core::{ComponentRecord, ExtractError, Extraction};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Directory component files are placed in.
pub const COMPONENTS_DIR: &str = "components";

/// One exported file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Path relative to the export root, `/`-separated.
    pub path: String,
    pub content: String,
}

/// Files exported for one library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportBundle {
    pub files: Vec<ExportFile>,
}

impl ExportBundle {
    pub fn get(&self, path: &str) -> Option<&ExportFile> {
        self.files.iter().find(|file| file.path == path)
    }

    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|file| file.path.as_str()).collect()
    }

    /// Write every file under `root`, creating directories as needed.
    pub fn write_to(&self, root: &Path) -> Result<()> {
        for file in &self.files {
            let path = root.join(&file.path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &file.content)?;
        }
        debug!(root = %root.display(), files = self.files.len(), "export written");
        Ok(())
    }
}

/// Export every record of `extraction`.
pub fn export_library(extraction: &Extraction, library_name: &str) -> Result<ExportBundle> {
    export_matching(extraction, library_name, |_| true)
}

/// Export the records named `component`, ignoring case.
pub fn export_component(extraction: &Extraction, library_name: &str, component: &str) -> Result<ExportBundle> {
    export_matching(extraction, library_name, |record| {
        record.declared_name.eq_ignore_ascii_case(component)
    })
}

fn export_matching<F>(extraction: &Extraction, library_name: &str, keep: F) -> Result<ExportBundle>
where
    F: Fn(&ComponentRecord) -> bool,
{
    let selected: Vec<&ComponentRecord> = extraction.components.iter().filter(|r| keep(r)).collect();
    if selected.is_empty() {
        return Err(ExtractError::NoComponents.into());
    }

    let mut files = vec![ExportFile {
        path: "README.md".to_string(),
        content: readme(library_name, selected.len()),
    }];

    let mut used = HashSet::new();
    for record in selected {
        let base = sanitize_file_name(&record.declared_name);
        let mut stem = base.clone();
        let mut n = 2;
        while !used.insert(stem.to_lowercase()) {
            stem = format!("{base}-{n}");
            n += 1;
        }
        files.push(ExportFile {
            path: format!("{COMPONENTS_DIR}/{stem}.tsx"),
            content: record.to_module(&extraction.imports, extraction.preamble.as_deref()),
        });
    }

    Ok(ExportBundle { files })
}

fn readme(library_name: &str, count: usize) -> String {
    let noun = if count == 1 { "component" } else { "components" };
    format!("Compkit export: {library_name}\n\nContains {count} {noun}.\n")
}

/// A name usable as a file name on every platform.
///
/// Path separators, reserved characters and control characters are removed;
/// leading and trailing dots and spaces are trimmed.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '/' | '\\' | '?' | '<' | '>' | ':' | '*' | '|' | '"'))
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == ' ');
    if cleaned.is_empty() {
        "Component".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compkit_core::{ImportSet, Role};

    fn extraction() -> Extraction {
        let mut imports = ImportSet::new();
        imports.insert("import * as React from \"react\"");
        Extraction {
            imports,
            stylesheet: None,
            preamble: Some("type Size = \"sm\" | \"md\"".to_string()),
            components: vec![
                ComponentRecord::new("Button", Role::Button, "export const Button = () => <button />"),
                ComponentRecord::new("Card", Role::Card, "const Card = () => <div />"),
                ComponentRecord::new("card", Role::Card, "const card = 1"),
            ],
        }
    }

    #[test]
    fn test_library_export_layout() {
        let bundle = export_library(&extraction(), "Dashboard Widgets").unwrap();
        assert_eq!(
            bundle.paths(),
            vec!["README.md", "components/Button.tsx", "components/Card.tsx", "components/card-2.tsx"]
        );
        assert_eq!(
            bundle.get("README.md").map(|f| f.content.as_str()),
            Some("Compkit export: Dashboard Widgets\n\nContains 3 components.\n")
        );
    }

    #[test]
    fn test_component_file_content() {
        let bundle = export_library(&extraction(), "Lib").unwrap();
        let card = bundle.get("components/Card.tsx").unwrap();

        insta::assert_snapshot!(card.content, @r###"
        import * as React from "react"

        type Size = "sm" | "md"

        const Card = () => <div />

        export { Card };
        "###);
    }

    #[test]
    fn test_single_component_export() {
        let bundle = export_component(&extraction(), "Lib", "BUTTON").unwrap();
        assert_eq!(bundle.paths(), vec!["README.md", "components/Button.tsx"]);
        assert!(bundle.files[0].content.contains("Contains 1 component."));

        let missing = export_component(&extraction(), "Lib", "Modal");
        assert!(missing.is_err());
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_file_name("My:Card?"), "MyCard");
        assert_eq!(sanitize_file_name(" .. "), "Component");
        assert_eq!(sanitize_file_name("Data Table"), "Data Table");
    }

    #[test]
    fn test_write_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = export_library(&extraction(), "Lib").unwrap();
        bundle.write_to(dir.path()).unwrap();

        let written = std::fs::read_to_string(dir.path().join("components/Button.tsx")).unwrap();
        assert_eq!(written, bundle.get("components/Button.tsx").unwrap().content);
        assert!(dir.path().join("README.md").exists());
    }
}
