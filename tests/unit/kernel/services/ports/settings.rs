use super::*;
use std::time::Duration;

#[test]
fn test_partial_document_merges_onto_defaults() {
    let settings: EditorSettings =
        serde_json::from_str(r#"{"theme":"hc-black","wordWrap":"wordWrapColumn"}"#).unwrap();
    assert_eq!(settings.theme, EditorTheme::HcBlack);
    assert_eq!(settings.word_wrap, WordWrap::WordWrapColumn);
    assert_eq!(settings.font_size, 14);
    assert_eq!(settings.auto_save_interval, 5000);
}

#[test]
fn test_serialized_keys_are_camel_case() {
    let json = serde_json::to_value(EditorSettings::default()).unwrap();
    assert_eq!(json["theme"], "vs-dark");
    assert_eq!(json["lineNumbers"], "on");
    assert_eq!(json["autoSaveInterval"], 5000);
    assert_eq!(json["syncScrolling"], false);
}

#[test]
fn test_auto_save_period() {
    let mut settings = EditorSettings::default();
    assert_eq!(settings.auto_save_period(), Some(Duration::from_millis(5000)));
    settings.auto_save = false;
    assert_eq!(settings.auto_save_period(), None);
}

#[test]
fn test_sync_period_requires_enabled() {
    let mut sync = CloudSyncSettings::default();
    assert_eq!(sync.sync_period(), None);
    sync.sync_enabled = true;
    assert_eq!(sync.sync_period(), Some(Duration::from_secs(60)));

    let json = serde_json::to_value(&sync).unwrap();
    assert!(json.get("lastSyncTime").is_none());
}
