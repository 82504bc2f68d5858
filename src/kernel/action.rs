use crate::kernel::editor::{CursorPosition, ScrollPosition, SplitDirection};
use crate::kernel::search::FindOptions;
use crate::kernel::services::ports::{CloudSyncSettings, EditorSettings, WorkspaceExport};
use crate::models::{FileId, NodeKind, PaneId, TabId};

#[derive(Debug, Clone)]
pub enum Action {
    AddFile {
        parent: Option<FileId>,
        name: String,
        kind: NodeKind,
        /// Open the new file in the active pane.
        open: bool,
    },
    RenameFile {
        id: FileId,
        name: String,
    },
    DeleteFile(FileId),
    MoveFile {
        id: FileId,
        new_parent: Option<FileId>,
    },
    ToggleFolder(FileId),

    OpenFile {
        id: FileId,
        pane: Option<PaneId>,
    },
    UpdateTabContent {
        tab: TabId,
        content: String,
    },
    SetTabViewState {
        tab: TabId,
        cursor: Option<CursorPosition>,
        scroll: Option<ScrollPosition>,
    },
    SaveTab(TabId),
    SaveActiveTab,
    /// Save every dirty tab, then persist the workspace.
    SaveAll,
    CloseTab(TabId),
    CloseOtherTabs {
        tab: TabId,
        pane: PaneId,
    },
    CloseAllTabs(PaneId),
    DuplicateTab(TabId),
    ReorderTabs {
        pane: PaneId,
        from: usize,
        to: usize,
    },

    SplitPane(SplitDirection),
    CloseSplit(PaneId),
    SetActivePane(PaneId),
    SetActiveTab {
        tab: TabId,
        pane: PaneId,
    },

    ToggleFindReplace,
    CloseFindReplace,
    SetFindOptions(FindOptions),
    GoToMatch(isize),
    NextMatch,
    PreviousMatch,
    ReplaceMatch,
    ReplaceAll,

    UpdateSettings(EditorSettings),
    ResetSettings,
    SetCloudSync(CloudSyncSettings),
    ImportWorkspace(Box<WorkspaceExport>),
}
