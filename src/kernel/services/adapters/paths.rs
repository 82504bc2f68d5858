//! 数据目录管理
//!
//! 跨平台的应用数据目录：
//! - macOS: ~/Library/Application Support/vibepad
//! - Linux: $XDG_DATA_HOME/vibepad 或 ~/.local/share/vibepad
//! - Windows: %APPDATA%\vibepad
//!
//! 工作区数据在 `workspace/`，日志在 `logs/`。

use std::path::{Path, PathBuf};

const APP_NAME: &str = "vibepad";
const STORE_DIR: &str = "workspace";
const LOG_DIR: &str = "logs";

/// 获取应用数据目录
pub fn get_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs_path_macos()
    }

    #[cfg(target_os = "linux")]
    {
        dirs_path_linux()
    }

    #[cfg(target_os = "windows")]
    {
        dirs_path_windows()
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(target_os = "macos")]
fn dirs_path_macos() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join("Library/Application Support")
            .join(APP_NAME)
    })
}

#[cfg(target_os = "linux")]
fn dirs_path_linux() -> Option<PathBuf> {
    // 优先使用 XDG_DATA_HOME，否则使用 ~/.local/share
    match std::env::var("XDG_DATA_HOME") {
        Ok(xdg) if !xdg.is_empty() => Some(PathBuf::from(xdg).join(APP_NAME)),
        _ => std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".local/share").join(APP_NAME)),
    }
}

#[cfg(target_os = "windows")]
fn dirs_path_windows() -> Option<PathBuf> {
    std::env::var("APPDATA")
        .ok()
        .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
}

/// Store directory under `root` (or the platform data directory).
pub fn get_store_dir(root: Option<&Path>) -> Option<PathBuf> {
    resolve_root(root).map(|p| p.join(STORE_DIR))
}

/// 获取日志目录路径
pub fn get_log_dir(root: Option<&Path>) -> Option<PathBuf> {
    resolve_root(root).map(|p| p.join(LOG_DIR))
}

fn resolve_root(root: Option<&Path>) -> Option<PathBuf> {
    match root {
        Some(root) => Some(root.to_path_buf()),
        None => get_data_dir(),
    }
}

/// 确保工作区目录存在
pub fn ensure_store_dir(root: Option<&Path>) -> std::io::Result<PathBuf> {
    let dir = get_store_dir(root).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine data directory",
        )
    })?;
    ensure_dir(dir)
}

/// 确保日志目录存在
pub fn ensure_log_dir(root: Option<&Path>) -> std::io::Result<PathBuf> {
    let dir = get_log_dir(root).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;
    ensure_dir(dir)
}

fn ensure_dir(dir: PathBuf) -> std::io::Result<PathBuf> {
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
