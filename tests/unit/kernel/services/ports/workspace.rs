use super::*;

#[test]
fn test_missing_required_field_is_rejected() {
    assert!(matches!(
        parse_workspace(r#"{"version": 1, "files": []}"#),
        Err(ImportError::MissingField("tabs"))
    ));
    assert!(matches!(
        parse_workspace(r#"{"files": [], "tabs": []}"#),
        Err(ImportError::MissingField("version"))
    ));
    assert!(matches!(
        parse_workspace(r#"{"version": null, "files": [], "tabs": []}"#),
        Err(ImportError::MissingField("version"))
    ));
    assert!(import_workspace_from_json(r#"{"version": 1, "tabs": []}"#).is_none());
}

#[test]
fn test_zero_version_and_garbage_are_rejected() {
    assert!(matches!(
        parse_workspace(r#"{"version": 0, "files": [], "tabs": []}"#),
        Err(ImportError::UnsupportedVersion(0))
    ));
    assert!(matches!(
        parse_workspace("not json"),
        Err(ImportError::Malformed(_))
    ));
    assert!(matches!(
        parse_workspace(r#"{"version": 1, "files": {}, "tabs": []}"#),
        Err(ImportError::Malformed(_))
    ));
}

#[test]
fn test_settings_default_when_missing() {
    let workspace = import_workspace_from_json(
        r#"{
            "version": 1,
            "files": [{"id": "f1", "name": "a.ts", "type": "file", "content": "let x"}],
            "tabs": [{"id": "t1", "fileId": "f1", "name": "a.ts", "language": "typescript",
                      "content": "let x = 1", "isDirty": true}]
        }"#,
    )
    .unwrap();
    assert_eq!(workspace.settings, EditorSettings::default());
    assert_eq!(workspace.exported_at, 0);
    assert_eq!(workspace.files[0].name, "a.ts");
    assert!(workspace.tabs[0].dirty);
}

#[test]
fn test_partial_settings_merge_onto_defaults() {
    let workspace = parse_workspace(
        r#"{"version": 1, "files": [], "tabs": [], "settings": {"fontSize": 18, "theme": "vs"}}"#,
    )
    .unwrap();
    assert_eq!(workspace.settings.font_size, 18);
    assert_eq!(
        workspace.settings.theme,
        crate::kernel::services::ports::settings::EditorTheme::Vs
    );
    assert_eq!(workspace.settings.tab_size, 2);
    assert!(workspace.settings.auto_save);
}

#[test]
fn test_export_document_shape() {
    let workspace = WorkspaceExport {
        version: WORKSPACE_EXPORT_VERSION,
        files: Vec::new(),
        tabs: Vec::new(),
        settings: EditorSettings::default(),
        exported_at: 42,
    };
    let text = export_workspace_to_json(&workspace).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["exportedAt"], 42);
    assert_eq!(value["settings"]["theme"], "vs-dark");
    assert_eq!(value["settings"]["autoSaveInterval"], 5000);
    assert_eq!(parse_workspace(&text).unwrap(), workspace);
}
