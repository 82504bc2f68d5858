//! Headless workspace core (state/action/effect).

pub mod action;
pub mod editor;
pub mod effect;
pub mod language;
pub mod search;
pub mod services;
pub mod state;
pub mod store;
pub mod timer;

pub use action::Action;
pub use editor::{EditorState, SplitDirection};
pub use effect::Effect;
pub use language::{file_icon, FileIcon, LanguageId};
pub use search::{FindMatch, FindOptions, FindReplaceState, SearchScope};
pub use state::{AppState, WorkspaceSnapshot};
pub use store::{DispatchResult, Store};
pub use timer::PeriodicTimer;
