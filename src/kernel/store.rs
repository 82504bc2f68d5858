use std::time::Instant;

use super::search::FindMatch;
use super::timer::PeriodicTimer;
use super::{Action, AppState, Effect};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }
}

pub struct Store {
    state: AppState,
    autosave: PeriodicTimer,
    cloud_sync: PeriodicTimer,
}

impl Store {
    pub fn new(state: AppState, now: Instant) -> Self {
        let mut store = Self {
            state,
            autosave: PeriodicTimer::new(),
            cloud_sync: PeriodicTimer::new(),
        };
        store.sync_timers(now);
        store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Direct access for hosts applying I/O results (restore, sync bookkeeping).
    /// Timer settings changed this way take effect on the next tick.
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    pub fn autosave_timer(&self) -> &PeriodicTimer {
        &self.autosave
    }

    pub fn cloud_sync_timer(&self) -> &PeriodicTimer {
        &self.cloud_sync
    }

    /// Polls the periodic timers.
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        self.sync_timers(now);
        let mut effects = Vec::new();
        if self.autosave.poll(now) {
            effects.push(Effect::PersistWorkspace);
        }
        if self.cloud_sync.poll(now) {
            effects.push(Effect::SyncToCloud);
        }
        effects
    }

    fn sync_timers(&mut self, now: Instant) {
        let autosave = self.state.settings().auto_save_period();
        rearm(&mut self.autosave, autosave, now);
        let cloud = self.state.cloud_sync().sync_period();
        rearm(&mut self.cloud_sync, cloud, now);
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let state = &mut self.state;
        match action {
            Action::AddFile {
                parent,
                name,
                kind,
                open,
            } => {
                let Some(id) = state.add_file(parent.as_ref(), &name, kind) else {
                    return DispatchResult::changed(false);
                };
                if open {
                    state.open_file(&id, None);
                }
                DispatchResult::changed(true)
            }
            Action::RenameFile { id, name } => DispatchResult::changed(state.rename_file(&id, &name)),
            Action::DeleteFile(id) => DispatchResult::changed(state.delete_file(&id)),
            Action::MoveFile { id, new_parent } => {
                DispatchResult::changed(state.move_file(&id, new_parent.as_ref()))
            }
            Action::ToggleFolder(id) => DispatchResult::changed(state.toggle_folder(&id)),

            Action::OpenFile { id, pane } => {
                DispatchResult::changed(state.open_file(&id, pane.as_ref()).is_some())
            }
            Action::UpdateTabContent { tab, content } => {
                DispatchResult::changed(state.update_tab_content(&tab, content))
            }
            Action::SetTabViewState {
                tab,
                cursor,
                scroll,
            } => DispatchResult::changed(state.set_tab_view_state(&tab, cursor, scroll)),
            Action::SaveTab(tab) => DispatchResult::changed(state.save_tab(&tab)),
            Action::SaveActiveTab => DispatchResult::changed(state.save_active_tab()),
            Action::SaveAll => {
                let saved = state.save_all_tabs();
                tracing::debug!(saved, "save all");
                DispatchResult {
                    effects: vec![Effect::PersistWorkspace],
                    state_changed: saved > 0,
                }
            }
            Action::CloseTab(tab) => DispatchResult::changed(state.close_tab(&tab)),
            Action::CloseOtherTabs { tab, pane } => {
                DispatchResult::changed(state.close_other_tabs(&tab, &pane))
            }
            Action::CloseAllTabs(pane) => DispatchResult::changed(state.close_all_tabs(&pane)),
            Action::DuplicateTab(tab) => {
                DispatchResult::changed(state.duplicate_tab(&tab).is_some())
            }
            Action::ReorderTabs { pane, from, to } => {
                DispatchResult::changed(state.reorder_tabs(&pane, from, to))
            }

            Action::SplitPane(direction) => {
                DispatchResult::changed(state.split_pane(direction).is_some())
            }
            Action::CloseSplit(pane) => DispatchResult::changed(state.close_split(&pane)),
            Action::SetActivePane(pane) => DispatchResult::changed(state.set_active_pane(&pane)),
            Action::SetActiveTab { tab, pane } => {
                DispatchResult::changed(state.set_active_tab(&tab, &pane))
            }

            Action::ToggleFindReplace => {
                state.toggle_find_replace();
                DispatchResult::changed(true)
            }
            Action::CloseFindReplace => DispatchResult::changed(state.close_find_replace()),
            Action::SetFindOptions(options) => {
                state.set_find_options(options);
                DispatchResult::changed(true)
            }
            Action::GoToMatch(index) => reveal(state.go_to_match(index)),
            Action::NextMatch => reveal(state.next_match()),
            Action::PreviousMatch => reveal(state.previous_match()),
            Action::ReplaceMatch => DispatchResult::changed(state.replace_match()),
            Action::ReplaceAll => DispatchResult::changed(state.replace_all() > 0),

            Action::UpdateSettings(settings) => {
                let changed = state.update_settings(settings);
                self.sync_timers(Instant::now());
                DispatchResult::changed(changed)
            }
            Action::ResetSettings => {
                let changed = state.reset_settings();
                self.sync_timers(Instant::now());
                DispatchResult::changed(changed)
            }
            Action::SetCloudSync(cloud_sync) => {
                let changed = state.set_cloud_sync(cloud_sync);
                self.sync_timers(Instant::now());
                DispatchResult::changed(changed)
            }
            Action::ImportWorkspace(workspace) => match state.apply_workspace(*workspace) {
                Ok(()) => {
                    self.sync_timers(Instant::now());
                    DispatchResult::changed(true)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "workspace import rejected");
                    DispatchResult::changed(false)
                }
            },
        }
    }
}

fn rearm(timer: &mut PeriodicTimer, period: Option<std::time::Duration>, now: Instant) {
    match period {
        Some(period) if timer.is_running() && timer.interval() == period => {}
        Some(period) => timer.start(period, now),
        None => timer.stop(),
    }
}

fn reveal(found: Option<FindMatch>) -> DispatchResult {
    match found {
        Some(m) => DispatchResult {
            effects: vec![Effect::RevealMatch {
                file_id: m.file_id,
                line_number: m.line_number,
                column: m.column,
                match_length: m.match_length,
            }],
            state_changed: true,
        },
        None => DispatchResult::changed(false),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
