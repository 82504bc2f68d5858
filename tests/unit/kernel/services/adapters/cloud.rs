use super::*;
use crate::kernel::services::ports::WorkspaceExport;
use crate::models::{FileId, NodeKind};
use std::sync::Mutex;

#[derive(Default)]
struct MemoryCloud {
    slot: Mutex<Option<WorkspaceExport>>,
    fail: bool,
}

impl CloudSync for MemoryCloud {
    async fn save(&self, workspace: &WorkspaceExport) -> io::Result<()> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "offline"));
        }
        *self.slot.lock().unwrap() = Some(workspace.clone());
        Ok(())
    }

    async fn load(&self) -> io::Result<Option<WorkspaceExport>> {
        Ok(self.slot.lock().unwrap().clone())
    }
}

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(fut)
}

#[test]
fn test_sync_records_time() {
    let cloud = MemoryCloud::default();
    let mut state = AppState::new();
    state.add_file(None, "notes.md", NodeKind::File);

    let at = block_on(sync_to_cloud(&cloud, &mut state)).unwrap();
    assert_eq!(state.cloud_sync().last_sync_time, Some(at));
    let stored = cloud.slot.lock().unwrap().clone().unwrap();
    assert_eq!(stored.files.len(), 1);
}

#[test]
fn test_failed_sync_leaves_time_unset() {
    let cloud = MemoryCloud {
        fail: true,
        ..MemoryCloud::default()
    };
    let mut state = AppState::new();
    assert!(block_on(sync_to_cloud(&cloud, &mut state)).is_err());
    assert_eq!(state.cloud_sync().last_sync_time, None);
}

#[test]
fn test_pull_replaces_workspace() {
    let cloud = MemoryCloud::default();
    let mut remote = AppState::new();
    let id = remote.add_file(None, "remote.txt", NodeKind::File).unwrap();
    remote.open_file(&id, None);
    block_on(sync_to_cloud(&cloud, &mut remote)).unwrap();

    let mut local = AppState::new();
    local.add_file(None, "local.txt", NodeKind::File);
    assert!(block_on(pull_from_cloud(&cloud, &mut local)).unwrap());
    assert!(local.file_by_path("remote.txt").is_some());
    assert!(local.file_by_path("local.txt").is_none());
    assert_eq!(local.editor().tabs().len(), 1);
}

#[test]
fn test_pull_from_empty_backend() {
    let cloud = MemoryCloud::default();
    let mut state = AppState::new();
    assert!(!block_on(pull_from_cloud(&cloud, &mut state)).unwrap());
}

#[test]
fn test_pull_rejects_broken_document() {
    let cloud = MemoryCloud::default();
    let mut remote = AppState::new();
    let id = remote.add_file(None, "a.txt", NodeKind::File).unwrap();
    remote.open_file(&id, None);
    let mut doc = remote.export_workspace();
    doc.tabs[0].file_id = FileId::new("missing");
    *cloud.slot.lock().unwrap() = Some(doc);

    let mut local = AppState::new();
    local.add_file(None, "keep.txt", NodeKind::File);
    let err = block_on(pull_from_cloud(&cloud, &mut local)).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert!(local.file_by_path("keep.txt").is_some());
}
