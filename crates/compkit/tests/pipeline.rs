//! Reply to preview to export, through the facade.

use compkit::{export_library, library_name_from_prompt, Batch, Config, Resolution, Role};

const THEMED_REPLY: &str = include_str!("fixtures/themed_reply.txt");

#[test]
fn test_reply_to_previews() {
    let mut batch = Batch::from_reply(THEMED_REPLY, &Config::default()).unwrap();

    let names: Vec<&str> = batch.components().iter().map(|r| r.declared_name.as_str()).collect();
    assert_eq!(names, vec!["Modal", "Navbar"]);
    let stylesheet = batch.extraction().stylesheet.as_ref().unwrap();
    assert!(stylesheet.as_str().contains("--radius: 0.5rem;"));

    let modal = batch.preview().unwrap();
    assert_eq!(modal.role, Role::Modal);
    assert_eq!(modal.mounted, Resolution::Declared("Modal".to_string()));
    assert!(modal.injected("X"));
    assert!(modal.html.contains("--primary: 222 47% 11%;"));
    assert!(!modal.html.contains("@tailwind base"));
    assert!(modal.html.contains("\"Invite collaborators\""));

    batch.select(1).unwrap();
    let navbar = batch.preview().unwrap();
    assert_eq!(navbar.role, Role::Navbar);
    assert!(navbar.html.contains("{ className: \"w-full max-w-4xl\" }"));
    assert!(navbar.stand_ins.is_empty());
}

#[test]
fn test_preview_follows_edits() {
    let mut batch = Batch::from_reply(THEMED_REPLY, &Config::default()).unwrap();
    batch.select(1).unwrap();
    batch
        .edit_selected("export default () => <nav className=\"edited-nav\" />")
        .unwrap();

    let doc = batch.preview().unwrap();
    assert_eq!(doc.mounted, Resolution::Declared("Navbar".to_string()));
    assert!(doc.html.contains("const Navbar = () => <nav className=\"edited-nav\" />"));
}

#[test]
fn test_export_named_from_prompt() {
    let batch = Batch::from_reply(THEMED_REPLY, &Config::default()).unwrap();
    let name = library_name_from_prompt("Create a modal and navbar for the admin area");
    assert_eq!(name, "Modal Navbar Admin");

    let bundle = export_library(batch.extraction(), &name).unwrap();
    assert_eq!(bundle.paths(), vec!["README.md", "components/Modal.tsx", "components/Navbar.tsx"]);

    let modal = &bundle.get("components/Modal.tsx").unwrap().content;
    assert!(modal.starts_with("import * as React from \"react\"\nimport { X } from \"lucide-react\"\n\nexport function Modal"));
    assert!(!modal.contains("export { Modal"));
    assert!(bundle.files[0].content.starts_with("Compkit export: Modal Navbar Admin"));
}

#[test]
fn test_config_disables_merging() {
    let config = Config::from_json(r#"{"extract": {"merge_by_role": false}}"#).unwrap();
    let reply = "const Card = () => <div className=\"rounded\" />\n\nconst CardHeader = () => <div />";

    let merged = Batch::from_reply(reply, &Config::default()).unwrap();
    let separate = Batch::from_reply(reply, &config).unwrap();

    assert_eq!(merged.len(), 1);
    assert_eq!(separate.len(), 2);
}
