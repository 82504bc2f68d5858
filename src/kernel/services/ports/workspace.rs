//! Workspace export document.

use crate::kernel::editor::EditorTabState;
use crate::kernel::services::ports::settings::EditorSettings;
use crate::models::{FileId, FileNode, FileTreeError, TabId};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const WORKSPACE_EXPORT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceExport {
    pub version: u32,
    pub files: Vec<FileNode>,
    pub tabs: Vec<EditorTabState>,
    #[serde(default)]
    pub settings: EditorSettings,
    #[serde(default)]
    pub exported_at: u64,
}

#[derive(Debug)]
pub enum ImportError {
    Malformed(serde_json::Error),
    MissingField(&'static str),
    UnsupportedVersion(u64),
    DuplicateNodeId(FileId),
    DuplicateTabId(TabId),
    DuplicateTabForFile(FileId),
    UnknownFile { tab: TabId, file: FileId },
    Tree(FileTreeError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Malformed(e) => write!(f, "malformed workspace document: {}", e),
            ImportError::MissingField(field) => write!(f, "workspace document has no `{}`", field),
            ImportError::UnsupportedVersion(v) => write!(f, "unsupported workspace version {}", v),
            ImportError::DuplicateNodeId(id) => write!(f, "file id {} appears twice", id),
            ImportError::DuplicateTabId(id) => write!(f, "tab id {} appears twice", id),
            ImportError::DuplicateTabForFile(id) => write!(f, "file {} has more than one tab", id),
            ImportError::UnknownFile { tab, file } => {
                write!(f, "tab {} refers to unknown file {}", tab, file)
            }
            ImportError::Tree(e) => write!(f, "invalid file tree: {}", e),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Malformed(e) => Some(e),
            ImportError::Tree(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(e: serde_json::Error) -> Self {
        ImportError::Malformed(e)
    }
}

impl From<FileTreeError> for ImportError {
    fn from(e: FileTreeError) -> Self {
        match e {
            FileTreeError::DuplicateId(id) => ImportError::DuplicateNodeId(id),
            other => ImportError::Tree(other),
        }
    }
}

/// Parses an export document. `version`, `files` and `tabs` must be present;
/// a missing `settings` falls back to defaults.
pub fn parse_workspace(text: &str) -> Result<WorkspaceExport, ImportError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    for field in ["version", "files", "tabs"] {
        if value.get(field).map_or(true, serde_json::Value::is_null) {
            return Err(ImportError::MissingField(field));
        }
    }
    let version = value
        .get("version")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0);
    if version == 0 {
        return Err(ImportError::UnsupportedVersion(version));
    }
    Ok(serde_json::from_value(value)?)
}

/// Like [`parse_workspace`], but any failure is just `None`.
pub fn import_workspace_from_json(text: &str) -> Option<WorkspaceExport> {
    match parse_workspace(text) {
        Ok(workspace) => Some(workspace),
        Err(e) => {
            tracing::warn!(error = %e, "workspace document rejected");
            None
        }
    }
}

pub fn export_workspace_to_json(workspace: &WorkspaceExport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(workspace)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/workspace.rs"]
mod tests;
