use crate::kernel::language::LanguageId;
use crate::models::{FileId, IdAllocator, PaneId, TabId};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Hard limit on simultaneously visible panes.
pub const MAX_PANES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPosition {
    pub line_number: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollPosition {
    pub scroll_top: f64,
    pub scroll_left: f64,
}

/// An open editing session bound to one file. `content` is the edit buffer; the
/// file keeps the saved text until the tab is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorTabState {
    pub id: TabId,
    pub file_id: FileId,
    pub name: String,
    #[serde(default)]
    pub language: LanguageId,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "isDirty", default)]
    pub dirty: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_position: Option<CursorPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_position: Option<ScrollPosition>,
}

impl EditorTabState {
    pub fn new(
        id: TabId,
        file_id: FileId,
        name: String,
        language: LanguageId,
        content: String,
    ) -> Self {
        Self {
            id,
            file_id,
            name,
            language,
            content,
            dirty: false,
            cursor_position: None,
            scroll_position: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorPaneState {
    pub id: PaneId,
    #[serde(default)]
    pub tab_ids: Vec<TabId>,
    #[serde(default)]
    pub active_tab_id: Option<TabId>,
}

impl EditorPaneState {
    pub fn new(id: PaneId) -> Self {
        Self {
            id,
            tab_ids: Vec::new(),
            active_tab_id: None,
        }
    }

    pub fn contains(&self, tab_id: &TabId) -> bool {
        self.tab_ids.contains(tab_id)
    }

    /// Keeps the tab ids accepted by `keep`. A dropped active tab is replaced by
    /// the nearest survivor before it, else the nearest survivor after it.
    pub(super) fn retain_tabs(&mut self, mut keep: impl FnMut(&TabId) -> bool) -> bool {
        let survivors: Vec<bool> = self.tab_ids.iter().map(&mut keep).collect();
        if survivors.iter().all(|&k| k) {
            return false;
        }

        if let Some(active) = self.active_tab_id.take() {
            self.active_tab_id = match self.tab_ids.iter().position(|id| *id == active) {
                Some(idx) if survivors[idx] => Some(active),
                Some(idx) => (0..idx)
                    .rev()
                    .chain(idx + 1..self.tab_ids.len())
                    .find(|&i| survivors[i])
                    .map(|i| self.tab_ids[i].clone()),
                None => None,
            };
        }

        let mut flags = survivors.into_iter();
        self.tab_ids.retain(|_| flags.next().unwrap_or(false));
        if self.active_tab_id.is_none() {
            self.active_tab_id = self.tab_ids.first().cloned();
        }
        true
    }

    fn dedup_tabs(&mut self, known: &FxHashSet<TabId>) {
        let mut seen = FxHashSet::default();
        self.tab_ids
            .retain(|id| known.contains(id) && seen.insert(id.clone()));
        let active_ok = self
            .active_tab_id
            .as_ref()
            .is_some_and(|active| self.tab_ids.contains(active));
        if !active_ok {
            self.active_tab_id = self.tab_ids.first().cloned();
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    #[serde(default)]
    pub direction: SplitDirection,
    pub panes: Vec<EditorPaneState>,
}

/// Open tabs and their placement across one or two panes.
///
/// Every tab is listed by at least one pane, every pane's active tab is one of
/// its own tabs, and the active pane is always one of the panes.
#[derive(Debug, Clone)]
pub struct EditorState {
    tabs: Vec<EditorTabState>,
    split: SplitConfig,
    active_pane: PaneId,
    tab_ids: IdAllocator,
    pane_ids: IdAllocator,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        let mut pane_ids = IdAllocator::new('p');
        let pane_id = PaneId::new(pane_ids.alloc(|_| false));
        Self {
            tabs: Vec::new(),
            split: SplitConfig {
                direction: SplitDirection::Horizontal,
                panes: vec![EditorPaneState::new(pane_id.clone())],
            },
            active_pane: pane_id,
            tab_ids: IdAllocator::new('t'),
            pane_ids,
        }
    }

    pub fn tabs(&self) -> &[EditorTabState] {
        &self.tabs
    }

    pub fn tab(&self, id: &TabId) -> Option<&EditorTabState> {
        self.tabs.iter().find(|t| t.id == *id)
    }

    pub fn tab_for_file(&self, file_id: &FileId) -> Option<&EditorTabState> {
        self.tabs.iter().find(|t| t.file_id == *file_id)
    }

    pub fn split(&self) -> &SplitConfig {
        &self.split
    }

    pub fn panes(&self) -> &[EditorPaneState] {
        &self.split.panes
    }

    pub fn pane(&self, id: &PaneId) -> Option<&EditorPaneState> {
        self.split.panes.iter().find(|p| p.id == *id)
    }

    pub fn active_pane_id(&self) -> &PaneId {
        &self.active_pane
    }

    pub fn active_pane(&self) -> Option<&EditorPaneState> {
        self.pane(&self.active_pane)
    }

    pub fn active_tab(&self) -> Option<&EditorTabState> {
        let id = self.active_pane()?.active_tab_id.as_ref()?;
        self.tab(id)
    }

    pub fn dirty_tab_count(&self) -> usize {
        self.tabs.iter().filter(|t| t.dirty).count()
    }

    pub fn dirty_tab_ids(&self) -> Vec<TabId> {
        self.tabs
            .iter()
            .filter(|t| t.dirty)
            .map(|t| t.id.clone())
            .collect()
    }

    fn tab_mut(&mut self, id: &TabId) -> Option<&mut EditorTabState> {
        self.tabs.iter_mut().find(|t| t.id == *id)
    }

    fn pane_mut(&mut self, id: &PaneId) -> Option<&mut EditorPaneState> {
        self.split.panes.iter_mut().find(|p| p.id == *id)
    }

    fn alloc_tab_id(&mut self) -> TabId {
        let tabs = &self.tabs;
        TabId::new(self.tab_ids.alloc(|raw| tabs.iter().any(|t| t.id.as_str() == raw)))
    }

    fn alloc_pane_id(&mut self) -> PaneId {
        let panes = &self.split.panes;
        PaneId::new(
            self.pane_ids
                .alloc(|raw| panes.iter().any(|p| p.id.as_str() == raw)),
        )
    }

    /// Opens `file_id` in `pane` (default: the active pane), reusing the file's
    /// tab when one exists. The target pane gains focus.
    pub fn open_file(
        &mut self,
        file_id: &FileId,
        name: &str,
        language: LanguageId,
        content: &str,
        pane: Option<&PaneId>,
    ) -> Option<TabId> {
        let pane_id = pane.unwrap_or(&self.active_pane).clone();
        self.pane(&pane_id)?;

        let tab_id = match self.tab_for_file(file_id) {
            Some(tab) => tab.id.clone(),
            None => {
                let id = self.alloc_tab_id();
                self.tabs.push(EditorTabState::new(
                    id.clone(),
                    file_id.clone(),
                    name.to_string(),
                    language,
                    content.to_string(),
                ));
                id
            }
        };

        let pane = self.pane_mut(&pane_id)?;
        if !pane.contains(&tab_id) {
            pane.tab_ids.push(tab_id.clone());
        }
        pane.active_tab_id = Some(tab_id.clone());
        self.active_pane = pane_id;
        Some(tab_id)
    }

    pub fn update_tab_content(&mut self, id: &TabId, content: String) -> bool {
        let Some(tab) = self.tab_mut(id) else {
            return false;
        };
        tab.content = content;
        tab.dirty = true;
        true
    }

    pub fn mark_clean(&mut self, id: &TabId) -> bool {
        let Some(tab) = self.tab_mut(id) else {
            return false;
        };
        tab.dirty = false;
        true
    }

    pub fn set_tab_view_state(
        &mut self,
        id: &TabId,
        cursor: Option<CursorPosition>,
        scroll: Option<ScrollPosition>,
    ) -> bool {
        let Some(tab) = self.tab_mut(id) else {
            return false;
        };
        if cursor.is_some() {
            tab.cursor_position = cursor;
        }
        if scroll.is_some() {
            tab.scroll_position = scroll;
        }
        true
    }

    pub fn rename_file(&mut self, file_id: &FileId, name: &str, language: Option<LanguageId>) -> bool {
        let Some(tab) = self.tabs.iter_mut().find(|t| t.file_id == *file_id) else {
            return false;
        };
        tab.name = name.to_string();
        if let Some(language) = language {
            tab.language = language;
        }
        true
    }

    pub fn close_tab(&mut self, id: &TabId) -> bool {
        let mut ids = FxHashSet::default();
        ids.insert(id.clone());
        self.remove_tabs(&ids) > 0
    }

    /// Removes the tabs everywhere in one step. Returns how many existed.
    pub fn remove_tabs(&mut self, ids: &FxHashSet<TabId>) -> usize {
        let before = self.tabs.len();
        self.tabs.retain(|t| !ids.contains(&t.id));
        for pane in &mut self.split.panes {
            pane.retain_tabs(|id| !ids.contains(id));
        }
        before - self.tabs.len()
    }

    pub fn close_tabs_for_files(&mut self, file_ids: &FxHashSet<FileId>) -> usize {
        let ids: FxHashSet<TabId> = self
            .tabs
            .iter()
            .filter(|t| file_ids.contains(&t.file_id))
            .map(|t| t.id.clone())
            .collect();
        if ids.is_empty() {
            return 0;
        }
        self.remove_tabs(&ids)
    }

    /// Leaves only `keep` in `pane`. Tabs still shown by another pane survive.
    pub fn close_other_tabs(&mut self, keep: &TabId, pane: &PaneId) -> bool {
        let Some(pane) = self.pane_mut(pane) else {
            return false;
        };
        if !pane.contains(keep) {
            return false;
        }
        pane.retain_tabs(|id| id == keep);
        pane.active_tab_id = Some(keep.clone());
        self.drop_unreferenced_tabs();
        true
    }

    pub fn close_all_tabs(&mut self, pane: &PaneId) -> bool {
        let Some(pane) = self.pane_mut(pane) else {
            return false;
        };
        pane.tab_ids.clear();
        pane.active_tab_id = None;
        self.drop_unreferenced_tabs();
        true
    }

    fn drop_unreferenced_tabs(&mut self) -> usize {
        let panes = &self.split.panes;
        let before = self.tabs.len();
        self.tabs
            .retain(|t| panes.iter().any(|p| p.contains(&t.id)));
        before - self.tabs.len()
    }

    /// Moves one tab within a pane; `to` is clamped, an out-of-range `from` is a
    /// no-op. The active tab does not change.
    pub fn reorder_tabs(&mut self, pane: &PaneId, from: usize, to: usize) -> bool {
        let Some(pane) = self.pane_mut(pane) else {
            return false;
        };
        if from >= pane.tab_ids.len() {
            return false;
        }
        let to = to.min(pane.tab_ids.len() - 1);
        if from == to {
            return false;
        }
        let id = pane.tab_ids.remove(from);
        pane.tab_ids.insert(to, id);
        true
    }

    /// Adds an empty second pane. No-op once the pane limit is reached.
    pub fn split_pane(&mut self, direction: SplitDirection) -> Option<PaneId> {
        if self.split.panes.len() >= MAX_PANES {
            return None;
        }
        let id = self.alloc_pane_id();
        self.split.direction = direction;
        self.split.panes.push(EditorPaneState::new(id.clone()));
        Some(id)
    }

    /// Removes a pane when more than one exists, discarding the tabs only it
    /// listed. Focus moves to the first remaining pane.
    pub fn close_split(&mut self, pane: &PaneId) -> bool {
        if self.split.panes.len() <= 1 {
            return false;
        }
        let Some(index) = self.split.panes.iter().position(|p| p.id == *pane) else {
            return false;
        };
        self.split.panes.remove(index);
        self.drop_unreferenced_tabs();
        if let Some(first) = self.split.panes.first() {
            self.active_pane = first.id.clone();
        }
        true
    }

    pub fn set_active_pane(&mut self, pane: &PaneId) -> bool {
        if self.pane(pane).is_none() || self.active_pane == *pane {
            return false;
        }
        self.active_pane = pane.clone();
        true
    }

    pub fn set_active_tab(&mut self, tab: &TabId, pane_id: &PaneId) -> bool {
        let Some(pane) = self.pane_mut(pane_id) else {
            return false;
        };
        if !pane.contains(tab) {
            return false;
        }
        pane.active_tab_id = Some(tab.clone());
        self.active_pane = pane_id.clone();
        true
    }

    /// Replaces every tab and the layout. Duplicate tabs and dangling pane
    /// entries are dropped; tabs no pane lists go to the first pane. Without a
    /// layout all tabs land in one fresh pane.
    pub fn restore(&mut self, tabs: Vec<EditorTabState>, split: Option<SplitConfig>) {
        let mut seen_tabs = FxHashSet::default();
        let mut seen_files = FxHashSet::default();
        self.tabs = tabs
            .into_iter()
            .filter(|t| seen_tabs.insert(t.id.clone()) && seen_files.insert(t.file_id.clone()))
            .collect();
        let known: FxHashSet<TabId> = self.tabs.iter().map(|t| t.id.clone()).collect();

        let mut split = split.unwrap_or(SplitConfig {
            direction: SplitDirection::Horizontal,
            panes: Vec::new(),
        });
        split.panes.truncate(MAX_PANES);
        if split.panes.len() == MAX_PANES && split.panes[0].id == split.panes[1].id {
            split.panes.pop();
        }
        self.split = split;
        if self.split.panes.is_empty() {
            let id = self.alloc_pane_id();
            self.split.panes.push(EditorPaneState::new(id));
        }

        for pane in &mut self.split.panes {
            pane.dedup_tabs(&known);
        }
        let orphans: Vec<TabId> = self
            .tabs
            .iter()
            .filter(|t| !self.split.panes.iter().any(|p| p.contains(&t.id)))
            .map(|t| t.id.clone())
            .collect();
        if let Some(first) = self.split.panes.first_mut() {
            first.tab_ids.extend(orphans);
            if first.active_tab_id.is_none() {
                first.active_tab_id = first.tab_ids.first().cloned();
            }
            self.active_pane = first.id.clone();
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/state.rs"]
mod tests;
