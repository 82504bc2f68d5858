//! Editor domain: open tabs and split panes.

mod state;

pub use state::{
    CursorPosition, EditorPaneState, EditorState, EditorTabState, ScrollPosition, SplitConfig,
    SplitDirection, MAX_PANES,
};
