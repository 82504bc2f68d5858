use crate::kernel::editor::{EditorTabState, SplitConfig};
use crate::kernel::services::ports::settings::EditorSettings;
use crate::models::FileNode;
use std::future::Future;
use std::io;

/// Key-value persistence for the workspace collections. Loads return
/// `Ok(None)` when nothing has been stored yet.
pub trait WorkspaceStore: Send + Sync {
    fn save_files(&self, files: &[FileNode]) -> impl Future<Output = io::Result<()>> + Send;
    fn load_files(&self) -> impl Future<Output = io::Result<Option<Vec<FileNode>>>> + Send;

    fn save_tabs(&self, tabs: &[EditorTabState]) -> impl Future<Output = io::Result<()>> + Send;
    fn load_tabs(&self) -> impl Future<Output = io::Result<Option<Vec<EditorTabState>>>> + Send;

    fn save_split_config(
        &self,
        config: &SplitConfig,
    ) -> impl Future<Output = io::Result<()>> + Send;
    fn load_split_config(&self) -> impl Future<Output = io::Result<Option<SplitConfig>>> + Send;

    fn save_settings(
        &self,
        settings: &EditorSettings,
    ) -> impl Future<Output = io::Result<()>> + Send;
    fn load_settings(&self) -> impl Future<Output = io::Result<Option<EditorSettings>>> + Send;
}
