//! Push/pull of the whole workspace through a [`CloudSync`] backend.

use std::io;

use crate::kernel::services::ports::CloudSync;
use crate::kernel::state::AppState;
use crate::models::now_millis;

/// Uploads the current workspace and stamps the sync time. Returns the stamp.
pub async fn sync_to_cloud<C: CloudSync>(cloud: &C, state: &mut AppState) -> io::Result<u64> {
    let workspace = state.export_workspace();
    if let Err(e) = cloud.save(&workspace).await {
        tracing::warn!(error = %e, "cloud sync failed");
        return Err(e);
    }
    let at = now_millis();
    state.record_cloud_sync(at);
    tracing::info!(files = workspace.files.len(), tabs = workspace.tabs.len(), "cloud sync done");
    Ok(at)
}

/// Replaces the local workspace with the remote copy. `Ok(false)` when the
/// backend holds nothing.
pub async fn pull_from_cloud<C: CloudSync>(cloud: &C, state: &mut AppState) -> io::Result<bool> {
    let Some(workspace) = cloud.load().await? else {
        return Ok(false);
    };
    state
        .apply_workspace(workspace)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    state.record_cloud_sync(now_millis());
    Ok(true)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/cloud.rs"]
mod tests;
