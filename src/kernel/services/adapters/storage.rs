//! JSON file store: one document per collection under a directory.

use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::kernel::editor::{EditorTabState, SplitConfig};
use crate::kernel::services::ports::{EditorSettings, WorkspaceStore};
use crate::kernel::state::{AppState, WorkspaceSnapshot};
use crate::models::FileNode;

const FILES: &str = "files.json";
const TABS: &str = "tabs.json";
const SPLIT_CONFIG: &str = "split.json";
const SETTINGS: &str = "settings.json";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Removes files, tabs and layout. Settings are kept.
    pub async fn clear_all(&self) -> io::Result<()> {
        for name in [FILES, TABS, SPLIT_CONFIG] {
            match tokio::fs::remove_file(self.dir.join(name)).await {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    async fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> io::Result<()> {
        let data = serde_json::to_vec_pretty(value)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(name);
        let tmp = self.dir.join(format!("{}.tmp", name));
        tokio::fs::write(&tmp, data).await?;
        tokio::fs::rename(&tmp, &path).await
    }

    async fn read<T: DeserializeOwned>(&self, name: &str) -> io::Result<Option<T>> {
        let data = match tokio::fs::read(self.dir.join(name)).await {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl WorkspaceStore for JsonFileStore {
    async fn save_files(&self, files: &[FileNode]) -> io::Result<()> {
        self.write(FILES, files).await
    }

    async fn load_files(&self) -> io::Result<Option<Vec<FileNode>>> {
        self.read(FILES).await
    }

    async fn save_tabs(&self, tabs: &[EditorTabState]) -> io::Result<()> {
        self.write(TABS, tabs).await
    }

    async fn load_tabs(&self) -> io::Result<Option<Vec<EditorTabState>>> {
        self.read(TABS).await
    }

    async fn save_split_config(&self, config: &SplitConfig) -> io::Result<()> {
        self.write(SPLIT_CONFIG, config).await
    }

    async fn load_split_config(&self) -> io::Result<Option<SplitConfig>> {
        self.read(SPLIT_CONFIG).await
    }

    async fn save_settings(&self, settings: &EditorSettings) -> io::Result<()> {
        self.write(SETTINGS, settings).await
    }

    async fn load_settings(&self) -> io::Result<Option<EditorSettings>> {
        self.read(SETTINGS).await
    }
}

/// Writes all four collections.
pub async fn persist_workspace<S: WorkspaceStore>(store: &S, state: &AppState) -> io::Result<()> {
    let files = state.files().to_nodes();
    store.save_files(&files).await?;
    store.save_tabs(state.editor().tabs()).await?;
    store.save_split_config(state.editor().split()).await?;
    store.save_settings(state.settings()).await?;
    tracing::info!(
        files = state.files().len(),
        tabs = state.editor().tabs().len(),
        "workspace persisted"
    );
    Ok(())
}

/// Loads every collection, then applies them in one step.
pub async fn restore_workspace<S: WorkspaceStore>(store: &S, state: &mut AppState) -> io::Result<()> {
    let snapshot = WorkspaceSnapshot {
        files: store.load_files().await?,
        tabs: store.load_tabs().await?,
        split: store.load_split_config().await?,
        settings: store.load_settings().await?,
    };
    state.restore(snapshot);
    Ok(())
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/storage.rs"]
mod tests;
