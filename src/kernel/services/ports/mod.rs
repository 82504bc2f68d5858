//! Service ports: traits + data contracts.

pub mod cloud;
pub mod settings;
pub mod storage;
pub mod workspace;

pub use cloud::CloudSync;
pub use settings::{CloudSyncSettings, EditorSettings, EditorTheme, LineNumbers, WordWrap};
pub use storage::WorkspaceStore;
pub use workspace::{
    export_workspace_to_json, import_workspace_from_json, parse_workspace, ImportError,
    WorkspaceExport, WORKSPACE_EXPORT_VERSION,
};
