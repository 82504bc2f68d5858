//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod cloud;
pub mod paths;
pub mod storage;

pub use cloud::{pull_from_cloud, sync_to_cloud};
pub use paths::{ensure_log_dir, ensure_store_dir, get_data_dir, get_log_dir, get_store_dir};
pub use storage::{persist_workspace, restore_workspace, JsonFileStore};
