//! 数据模型层

pub mod file_tree;
pub mod ids;

pub use file_tree::{
    display_order, now_millis, FileNode, FileTree, FileTreeError, FileTreeRow, NodeKind, NodeRef,
};
pub use ids::{FileId, IdAllocator, PaneId, TabId};
