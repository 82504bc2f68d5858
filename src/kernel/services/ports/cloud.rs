use crate::kernel::services::ports::workspace::WorkspaceExport;
use std::future::Future;
use std::io;

/// Remote copy of a whole workspace. Authentication is the implementor's concern.
pub trait CloudSync: Send + Sync {
    fn save(&self, workspace: &WorkspaceExport) -> impl Future<Output = io::Result<()>> + Send;
    fn load(&self) -> impl Future<Output = io::Result<Option<WorkspaceExport>>> + Send;
}
