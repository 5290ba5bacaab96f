//! A generation batch and its selected component.

use crate::config::Config;
use crate::error::Result;
use compkit_core::{ComponentRecord, ExtractError, Extraction};
use compkit_extract::{from_structured, Extractor, RoleDetector, StructuredReply};
use compkit_preview::{PreviewDocument, PreviewError, Synthesizer};
use tracing::debug;

/// The records of one generation plus the one the user is looking at.
///
/// Replacing the reply replaces every record; nothing carries over from
/// the previous extraction except the configuration.
pub struct Batch<'a> {
    extractor: Extractor,
    synthesizer: Synthesizer<'a>,
    extraction: Extraction,
    selected: Option<usize>,
}

impl<'a> Batch<'a> {
    /// An empty batch. Previewing it fails with [`PreviewError::NoSelection`].
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            extractor: Extractor::with_options(config.extract.clone()),
            synthesizer: Synthesizer::with_options(config.preview.clone())?,
            extraction: Extraction::empty(),
            selected: None,
        })
    }

    /// Extract a batch from a model reply and select its first record.
    pub fn from_reply(reply: &str, config: &Config) -> Result<Self> {
        let mut batch = Self::new(config)?;
        batch.replace_reply(reply)?;
        Ok(batch)
    }

    /// Build a batch from a JSON structured reply.
    pub fn from_structured(json: &str, config: &Config) -> Result<Self> {
        let mut batch = Self::new(config)?;
        batch.replace_structured(json)?;
        Ok(batch)
    }

    /// Replace every record with those extracted from `reply`.
    pub fn replace_reply(&mut self, reply: &str) -> Result<()> {
        if reply.trim().is_empty() {
            return Err(ExtractError::EmptyInput.into());
        }
        let extraction = self.extractor.extract(reply);
        self.replace(extraction)
    }

    pub fn replace_structured(&mut self, json: &str) -> Result<()> {
        let reply = StructuredReply::from_json(json)?;
        let extraction = from_structured(&reply, &RoleDetector::new())?;
        self.replace(extraction)
    }

    /// Replace every record and select the first one.
    pub fn replace(&mut self, extraction: Extraction) -> Result<()> {
        if extraction.is_empty() {
            return Err(ExtractError::NoComponents.into());
        }
        debug!(components = ?extraction.names(), "batch replaced");
        self.extraction = extraction;
        self.selected = Some(0);
        Ok(())
    }

    pub fn extraction(&self) -> &Extraction {
        &self.extraction
    }

    pub fn components(&self) -> &[ComponentRecord] {
        &self.extraction.components
    }

    pub fn len(&self) -> usize {
        self.extraction.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extraction.is_empty()
    }

    /// Select the record at `index`.
    pub fn select(&mut self, index: usize) -> Result<&ComponentRecord> {
        self.extraction.get(index)?;
        self.selected = Some(index);
        Ok(&self.extraction.components[index])
    }

    /// Select the first record whose declared name matches, ignoring case.
    pub fn select_name(&mut self, name: &str) -> Option<&ComponentRecord> {
        let index = self
            .extraction
            .components
            .iter()
            .position(|record| record.declared_name.eq_ignore_ascii_case(name))?;
        self.selected = Some(index);
        self.extraction.components.get(index)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&ComponentRecord> {
        self.selected.and_then(|index| self.extraction.components.get(index))
    }

    /// Replace the selected record's body with edited code. The name, role
    /// and auxiliary names stay as extracted.
    pub fn edit_selected(&mut self, body: impl Into<String>) -> Result<()> {
        let index = self.selected.ok_or(PreviewError::NoSelection)?;
        let record = self
            .extraction
            .components
            .get_mut(index)
            .ok_or(PreviewError::NoSelection)?;
        record.body = body.into();
        Ok(())
    }

    /// Build a fresh preview document for the selected record.
    pub fn preview(&self) -> Result<PreviewDocument> {
        let record = self.selected().ok_or(PreviewError::NoSelection)?;
        Ok(self.synthesizer.synthesize_in(record, &self.extraction)?)
    }

    /// The selected record as a standalone module.
    pub fn selected_module(&self) -> Result<String> {
        let index = self.selected.ok_or(PreviewError::NoSelection)?;
        Ok(self.extraction.module_for(index)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompkitError;
    use compkit_core::Role;

    const REPLY: &str = "```tsx\nimport React from \"react\"\n\nconst Button = ({ children }) => {\n  return <button className=\"px-4\">{children}</button>\n}\n\nconst StatCard = ({ label, value }) => {\n  return (\n    <div className=\"rounded-lg border p-4\">\n      <p>{label}</p>\n      <p>{value}</p>\n    </div>\n  )\n}\n```";

    fn batch() -> Batch<'static> {
        Batch::from_reply(REPLY, &Config::default()).unwrap()
    }

    #[test]
    fn test_first_record_selected() {
        let batch = batch();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.selected_index(), Some(0));
        assert_eq!(batch.selected().map(|r| r.role), Some(Role::Button));
    }

    #[test]
    fn test_select_by_index_and_name() {
        let mut batch = batch();
        assert_eq!(batch.select(1).unwrap().declared_name, "StatCard");

        let err = batch.select(5).unwrap_err();
        assert!(matches!(
            err,
            CompkitError::Extract(ExtractError::SelectionOutOfRange { index: 5, len: 2 })
        ));
        assert_eq!(batch.selected_index(), Some(1));

        assert_eq!(batch.select_name("button").map(|r| r.role), Some(Role::Button));
        assert!(batch.select_name("Modal").is_none());
        assert_eq!(batch.selected_index(), Some(0));
    }

    #[test]
    fn test_empty_batch() {
        let batch = Batch::new(&Config::default()).unwrap();
        assert!(batch.is_empty());
        assert!(matches!(
            batch.preview(),
            Err(CompkitError::Preview(PreviewError::NoSelection))
        ));
    }

    #[test]
    fn test_blank_reply_rejected() {
        let result = Batch::from_reply("  \n ", &Config::default());
        assert!(matches!(result, Err(CompkitError::Extract(ExtractError::EmptyInput))));
    }

    #[test]
    fn test_replace_resets_selection() {
        let mut batch = batch();
        batch.select(1).unwrap();
        batch
            .replace_reply("const Badge = () => <span className=\"badge\">New</span>")
            .unwrap();

        assert_eq!(batch.len(), 1);
        assert_eq!(batch.selected_index(), Some(0));
        assert_eq!(batch.selected().map(|r| r.declared_name.as_str()), Some("Badge"));
    }

    #[test]
    fn test_edit_then_preview() {
        let mut batch = batch();
        batch
            .edit_selected("const Button = ({ children }) => <button className=\"edited\">{children}</button>")
            .unwrap();

        let doc = batch.preview().unwrap();
        assert!(doc.html.contains("className=\"edited\""));
        assert_eq!(doc.role, Role::Button);
    }

    #[test]
    fn test_selected_module() {
        let batch = batch();
        let module = batch.selected_module().unwrap();
        assert!(module.starts_with("import React from \"react\"\n\nconst Button"));
        assert!(module.trim_end().ends_with("export { Button };"));
    }

    #[test]
    fn test_structured_batch() {
        let batch = Batch::from_structured(
            r#"{"components": {"card": "const Card = ({ children }) => <div>{children}</div>"}, "css": ":root { --radius: 1rem; }"}"#,
            &Config::default(),
        )
        .unwrap();

        assert_eq!(batch.selected().map(|r| r.declared_name.as_str()), Some("Card"));
        assert!(batch.preview().unwrap().html.contains("--radius: 1rem;"));
    }
}
