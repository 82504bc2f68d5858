use super::*;
use crate::kernel::editor::SplitDirection;
use crate::kernel::services::ports::EditorTheme;
use crate::models::NodeKind;

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(fut)
}

fn sample_state() -> AppState {
    let mut state = AppState::new();
    let src = state.add_file(None, "src", NodeKind::Folder).unwrap();
    let main = state.add_file(Some(&src), "main.rs", NodeKind::File).unwrap();
    let readme = state.add_file(None, "README.md", NodeKind::File).unwrap();
    let tab = state.open_file(&main, None).unwrap();
    state.update_tab_content(&tab, "fn main() {}".to_string());
    state.save_tab(&tab);
    state.split_pane(SplitDirection::Vertical);
    state.open_file(&readme, None);
    state
}

#[test]
fn test_load_from_empty_dir_is_none() {
    let tmp = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(tmp.path().join("missing"));
    block_on(async {
        assert!(store.load_files().await.unwrap().is_none());
        assert!(store.load_tabs().await.unwrap().is_none());
        assert!(store.load_split_config().await.unwrap().is_none());
        assert!(store.load_settings().await.unwrap().is_none());
    });
}

#[test]
fn test_persist_then_restore() {
    let tmp = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(tmp.path());
    let mut state = sample_state();
    let mut settings = state.settings().clone();
    settings.theme = EditorTheme::HcBlack;
    state.update_settings(settings.clone());

    block_on(persist_workspace(&store, &state)).unwrap();
    assert!(tmp.path().join("files.json").is_file());
    assert!(tmp.path().join("split.json").is_file());

    let mut restored = AppState::new();
    block_on(restore_workspace(&store, &mut restored)).unwrap();

    assert_eq!(restored.files().to_nodes(), state.files().to_nodes());
    assert_eq!(restored.editor().tabs(), state.editor().tabs());
    assert_eq!(restored.editor().panes().len(), 2);
    assert_eq!(restored.settings(), &settings);
    assert!(restored.file_by_path("src/main.rs").is_some());
}

#[test]
fn test_corrupt_document_is_invalid_data() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("tabs.json"), "{ not json").unwrap();
    let store = JsonFileStore::new(tmp.path());

    let err = block_on(store.load_tabs()).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn test_clear_all_keeps_settings() {
    let tmp = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(tmp.path());
    let state = sample_state();

    block_on(async {
        persist_workspace(&store, &state).await.unwrap();
        store.clear_all().await.unwrap();
        // second clear sees nothing to remove
        store.clear_all().await.unwrap();

        assert!(store.load_files().await.unwrap().is_none());
        assert!(store.load_tabs().await.unwrap().is_none());
        assert!(store.load_split_config().await.unwrap().is_none());
        assert!(store.load_settings().await.unwrap().is_some());
    });
}

#[test]
fn test_restore_drops_tabs_for_missing_files() {
    let tmp = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(tmp.path());
    let state = sample_state();

    block_on(async {
        persist_workspace(&store, &state).await.unwrap();
        let mut files = store.load_files().await.unwrap().unwrap();
        files.retain(|n| n.name != "README.md");
        store.save_files(&files).await.unwrap();
    });

    let mut restored = AppState::new();
    block_on(restore_workspace(&store, &mut restored)).unwrap();
    assert_eq!(restored.editor().tabs().len(), 1);
    assert_eq!(restored.editor().tabs()[0].name, "main.rs");
}
