//! vibepad - 无界面的多标签工作区内核
//!
//! 模块结构：
//! - models: 数据模型（FileTree, 各类 ID）
//! - kernel: 状态、动作、副作用（编辑器标签/分屏、查找替换、设置、定时器）
//! - kernel::services: 端口与适配器（持久化、云同步、数据目录）
//! - logging: 日志初始化

pub mod kernel;
pub mod logging;
pub mod models;
