use crate::models::FileId;

/// Requests for the host. Effects carry no state snapshot; the host reads the
/// current state when it handles them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Drive the editor widget to a match.
    RevealMatch {
        file_id: FileId,
        line_number: usize,
        column: usize,
        match_length: usize,
    },
    PersistWorkspace,
    SyncToCloud,
}
