//! Composition root: the file tree, open tabs, settings and find state.
//!
//! Every method here is one logical operation that leaves tree, tabs and panes
//! consistent with each other before it returns. Stale ids are not errors: the
//! operation logs at debug level and reports that nothing changed.

use rustc_hash::FxHashSet;

use crate::kernel::editor::{
    CursorPosition, EditorState, EditorTabState, ScrollPosition, SplitConfig, SplitDirection,
};
use crate::kernel::search::{FindMatch, FindOptions, FindReplaceState};
use crate::kernel::services::ports::{
    CloudSyncSettings, EditorSettings, ImportError, WorkspaceExport, WORKSPACE_EXPORT_VERSION,
};
use crate::models::{now_millis, FileId, FileNode, FileTree, NodeKind, NodeRef, PaneId, TabId};

/// Collections loaded from a persistent store. Absent or empty collections
/// leave the current state alone.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceSnapshot {
    pub files: Option<Vec<FileNode>>,
    pub tabs: Option<Vec<EditorTabState>>,
    pub split: Option<SplitConfig>,
    pub settings: Option<EditorSettings>,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    files: FileTree,
    editor: EditorState,
    settings: EditorSettings,
    cloud_sync: CloudSyncSettings,
    find: FindReplaceState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn files(&self) -> &FileTree {
        &self.files
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn cloud_sync(&self) -> &CloudSyncSettings {
        &self.cloud_sync
    }

    pub fn find(&self) -> &FindReplaceState {
        &self.find
    }

    pub fn file_by_id(&self, id: &FileId) -> Option<NodeRef<'_>> {
        self.files.get(id)
    }

    pub fn file_by_path(&self, path: &str) -> Option<NodeRef<'_>> {
        self.files.find_by_path(path)
    }

    fn refresh_find(&mut self) {
        if !self.find.options().search_text.is_empty() {
            self.find.refresh(&self.editor);
        }
    }

    // ==================== tree ====================

    pub fn add_file(&mut self, parent: Option<&FileId>, name: &str, kind: NodeKind) -> Option<FileId> {
        match self.files.insert(parent, name, kind) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::debug!(parent = ?parent, file_name = name, error = %e, "add file refused");
                None
            }
        }
    }

    /// Renames a node; a bound tab follows the new name and language.
    pub fn rename_file(&mut self, id: &FileId, new_name: &str) -> bool {
        if let Err(e) = self.files.rename(id, new_name) {
            tracing::debug!(file_id = %id, error = %e, "rename refused");
            return false;
        }
        let language = self.files.get(id).and_then(|n| n.language());
        if self.editor.rename_file(id, new_name, language) {
            self.refresh_find();
        }
        true
    }

    /// Deletes a node and its subtree, closing every tab bound to a removed file
    /// in the same step.
    pub fn delete_file(&mut self, id: &FileId) -> bool {
        let removed = match self.files.remove(id) {
            Ok(removed) => removed,
            Err(e) => {
                tracing::debug!(file_id = %id, error = %e, "delete refused");
                return false;
            }
        };
        let removed: FxHashSet<FileId> = removed.into_iter().collect();
        if self.editor.close_tabs_for_files(&removed) > 0 {
            self.refresh_find();
        }
        true
    }

    pub fn move_file(&mut self, id: &FileId, new_parent: Option<&FileId>) -> bool {
        match self.files.move_to(id, new_parent) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(file_id = %id, parent = ?new_parent, error = %e, "move refused");
                false
            }
        }
    }

    pub fn toggle_folder(&mut self, id: &FileId) -> bool {
        self.files.toggle_expanded(id)
    }

    // ==================== tabs ====================

    /// Opens a file in `pane` (default: active pane). Folders and unknown ids
    /// are ignored.
    pub fn open_file(&mut self, id: &FileId, pane: Option<&PaneId>) -> Option<TabId> {
        let Some(node) = self.files.get(id).filter(|n| !n.is_folder()) else {
            tracing::debug!(file_id = %id, "open ignored: not a file");
            return None;
        };
        let tab = self.editor.open_file(
            id,
            node.name(),
            node.language().unwrap_or_default(),
            node.content().unwrap_or_default(),
            pane,
        );
        if tab.is_some() {
            self.refresh_find();
        }
        tab
    }

    pub fn update_tab_content(&mut self, tab: &TabId, content: String) -> bool {
        if !self.editor.update_tab_content(tab, content) {
            tracing::debug!(tab_id = %tab, "update ignored: unknown tab");
            return false;
        }
        self.refresh_find();
        true
    }

    pub fn set_tab_view_state(
        &mut self,
        tab: &TabId,
        cursor: Option<CursorPosition>,
        scroll: Option<ScrollPosition>,
    ) -> bool {
        self.editor.set_tab_view_state(tab, cursor, scroll)
    }

    /// Copies the tab's buffer into its file and clears the dirty flag.
    pub fn save_tab(&mut self, tab: &TabId) -> bool {
        let Some(state) = self.editor.tab(tab) else {
            tracing::debug!(tab_id = %tab, "save ignored: unknown tab");
            return false;
        };
        let file_id = state.file_id.clone();
        if let Err(e) = self.files.set_content(&file_id, state.content.clone()) {
            tracing::debug!(tab_id = %tab, file_id = %file_id, error = %e, "save refused");
            return false;
        }
        self.editor.mark_clean(tab)
    }

    pub fn save_active_tab(&mut self) -> bool {
        match self.editor.active_tab().map(|t| t.id.clone()) {
            Some(id) => self.save_tab(&id),
            None => false,
        }
    }

    /// Saves every dirty tab. Returns how many were saved.
    pub fn save_all_tabs(&mut self) -> usize {
        self.editor
            .dirty_tab_ids()
            .iter()
            .filter(|id| self.save_tab(id))
            .count()
    }

    pub fn close_tab(&mut self, tab: &TabId) -> bool {
        let closed = self.editor.close_tab(tab);
        if closed {
            self.refresh_find();
        }
        closed
    }

    pub fn close_other_tabs(&mut self, tab: &TabId, pane: &PaneId) -> bool {
        let closed = self.editor.close_other_tabs(tab, pane);
        if closed {
            self.refresh_find();
        }
        closed
    }

    pub fn close_all_tabs(&mut self, pane: &PaneId) -> bool {
        let closed = self.editor.close_all_tabs(pane);
        if closed {
            self.refresh_find();
        }
        closed
    }

    /// Creates "<name> (copy)" next to the tab's file, seeded with the tab's
    /// current buffer, and opens it.
    pub fn duplicate_tab(&mut self, tab: &TabId) -> Option<TabId> {
        let state = self.editor.tab(tab)?;
        let content = state.content.clone();
        let node = self.files.get(&state.file_id)?;
        let parent = node.parent_id().cloned();
        let name = format!("{} (copy)", node.name());

        let copy = self.add_file(parent.as_ref(), &name, NodeKind::File)?;
        if let Err(e) = self.files.set_content(&copy, content) {
            tracing::debug!(file_id = %copy, error = %e, "duplicate content not written");
        }
        self.open_file(&copy, None)
    }

    pub fn reorder_tabs(&mut self, pane: &PaneId, from: usize, to: usize) -> bool {
        self.editor.reorder_tabs(pane, from, to)
    }

    pub fn split_pane(&mut self, direction: SplitDirection) -> Option<PaneId> {
        self.editor.split_pane(direction)
    }

    pub fn close_split(&mut self, pane: &PaneId) -> bool {
        let closed = self.editor.close_split(pane);
        if closed {
            self.refresh_find();
        }
        closed
    }

    pub fn set_active_pane(&mut self, pane: &PaneId) -> bool {
        let changed = self.editor.set_active_pane(pane);
        if changed {
            self.refresh_find();
        }
        changed
    }

    pub fn set_active_tab(&mut self, tab: &TabId, pane: &PaneId) -> bool {
        let changed = self.editor.set_active_tab(tab, pane);
        if changed {
            self.refresh_find();
        }
        changed
    }

    // ==================== find ====================

    pub fn toggle_find_replace(&mut self) {
        self.find.toggle();
    }

    pub fn close_find_replace(&mut self) -> bool {
        let was_visible = self.find.visible;
        self.find.visible = false;
        was_visible
    }

    /// Stores the find options, re-running the search when the query changed.
    pub fn set_find_options(&mut self, options: FindOptions) -> bool {
        if self.find.set_options(options) {
            self.find.perform_search(&self.editor);
            return true;
        }
        false
    }

    pub fn perform_search(&mut self) -> usize {
        self.find.perform_search(&self.editor)
    }

    pub fn go_to_match(&mut self, index: isize) -> Option<FindMatch> {
        self.find.go_to_match(index).cloned()
    }

    pub fn next_match(&mut self) -> Option<FindMatch> {
        self.find.next_match().cloned()
    }

    pub fn previous_match(&mut self) -> Option<FindMatch> {
        self.find.previous_match().cloned()
    }

    /// Replaces the current match through the tab's content update, then
    /// re-runs the search from the first match.
    pub fn replace_match(&mut self) -> bool {
        let Some((tab, content)) = self.find.replace_current(&self.editor) else {
            return false;
        };
        self.editor.update_tab_content(&tab, content);
        self.find.perform_search(&self.editor);
        true
    }

    /// Replaces every match in scope. Returns the number of replacements.
    pub fn replace_all(&mut self) -> usize {
        let edits = match self.find.replace_all(&self.editor) {
            Ok(edits) => edits,
            Err(e) => {
                tracing::debug!(error = %e, "replace all refused");
                self.find.refresh(&self.editor);
                return 0;
            }
        };
        let mut total = 0;
        for (tab, content, count) in edits {
            if self.editor.update_tab_content(&tab, content) {
                total += count;
            }
        }
        self.find.refresh(&self.editor);
        total
    }

    // ==================== settings ====================

    pub fn update_settings(&mut self, settings: EditorSettings) -> bool {
        if self.settings == settings {
            return false;
        }
        self.settings = settings;
        true
    }

    pub fn reset_settings(&mut self) -> bool {
        self.update_settings(EditorSettings::default())
    }

    pub fn set_cloud_sync(&mut self, cloud_sync: CloudSyncSettings) -> bool {
        if self.cloud_sync == cloud_sync {
            return false;
        }
        self.cloud_sync = cloud_sync;
        true
    }

    pub fn record_cloud_sync(&mut self, at: u64) {
        self.cloud_sync.last_sync_time = Some(at);
    }

    // ==================== workspace ====================

    pub fn export_workspace(&self) -> WorkspaceExport {
        WorkspaceExport {
            version: WORKSPACE_EXPORT_VERSION,
            files: self.files.to_nodes(),
            tabs: self.editor.tabs().to_vec(),
            settings: self.settings.clone(),
            exported_at: now_millis(),
        }
    }

    /// Replaces files, tabs and settings with an imported workspace. The
    /// document is checked in full first; on error nothing changes. The layout
    /// resets to one pane listing every imported tab.
    pub fn apply_workspace(&mut self, workspace: WorkspaceExport) -> Result<(), ImportError> {
        let files = FileTree::from_nodes(workspace.files)?;

        let mut tab_ids = FxHashSet::default();
        let mut file_ids = FxHashSet::default();
        for tab in &workspace.tabs {
            if !tab_ids.insert(tab.id.clone()) {
                return Err(ImportError::DuplicateTabId(tab.id.clone()));
            }
            if !file_ids.insert(tab.file_id.clone()) {
                return Err(ImportError::DuplicateTabForFile(tab.file_id.clone()));
            }
            if files.get(&tab.file_id).map_or(true, |n| n.is_folder()) {
                return Err(ImportError::UnknownFile {
                    tab: tab.id.clone(),
                    file: tab.file_id.clone(),
                });
            }
        }

        tracing::info!(
            files = files.len(),
            tabs = workspace.tabs.len(),
            "workspace imported"
        );
        self.files = files;
        self.editor.restore(workspace.tabs, None);
        self.settings = workspace.settings;
        self.refresh_find();
        Ok(())
    }

    /// Applies collections loaded from a persistent store. Tabs whose file is
    /// missing are dropped.
    pub fn restore(&mut self, snapshot: WorkspaceSnapshot) {
        let WorkspaceSnapshot {
            files,
            tabs,
            split,
            settings,
        } = snapshot;

        if let Some(nodes) = files.filter(|f| !f.is_empty()) {
            match FileTree::from_nodes(nodes) {
                Ok(tree) => self.files = tree,
                Err(e) => tracing::warn!(error = %e, "stored file tree rejected"),
            }
        }

        let tabs = match tabs.filter(|t| !t.is_empty()) {
            Some(tabs) => Some(tabs),
            None if split.is_some() => Some(self.editor.tabs().to_vec()),
            None => None,
        };
        let tabs = tabs.map(|tabs| {
            tabs.into_iter()
                .filter(|t| self.files.get(&t.file_id).is_some_and(|n| !n.is_folder()))
                .collect::<Vec<_>>()
        });
        match tabs {
            Some(tabs) => self.editor.restore(tabs, split),
            None => self.prune_orphan_tabs(),
        }

        if let Some(settings) = settings {
            self.settings = settings;
        }
        self.refresh_find();
        tracing::info!(
            files = self.files.len(),
            tabs = self.editor.tabs().len(),
            "workspace restored"
        );
    }

    fn prune_orphan_tabs(&mut self) {
        let orphans: FxHashSet<FileId> = self
            .editor
            .tabs()
            .iter()
            .filter(|t| self.files.get(&t.file_id).map_or(true, |n| n.is_folder()))
            .map(|t| t.file_id.clone())
            .collect();
        if !orphans.is_empty() {
            self.editor.close_tabs_for_files(&orphans);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
