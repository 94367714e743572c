//! 应用目录
//!
//! - 日志：`<data dir>/gotodoc/logs`（macOS `~/Library/Application Support`，
//!   Linux `$XDG_DATA_HOME` 或 `~/.local/share`，Windows `%APPDATA%`）
//! - 配置：`<cache dir>/.gotodoc/settings.json`

use std::path::PathBuf;

const APP_NAME: &str = "gotodoc";
const LOG_DIR: &str = "logs";

fn env_dir(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn home_join(rel: &str) -> Option<PathBuf> {
    env_dir("HOME").map(|home| home.join(rel))
}

/// 平台数据目录（不含应用名）
fn data_base_dir() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        home_join("Library/Application Support")
    } else if cfg!(target_os = "windows") {
        env_dir("APPDATA")
    } else if cfg!(unix) {
        env_dir("XDG_DATA_HOME").or_else(|| home_join(".local/share"))
    } else {
        None
    }
}

/// 平台缓存目录
pub(crate) fn get_cache_dir() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        home_join("Library/Caches")
    } else if cfg!(target_os = "windows") {
        env_dir("LOCALAPPDATA").or_else(|| env_dir("APPDATA"))
    } else if cfg!(unix) {
        env_dir("XDG_CACHE_HOME").or_else(|| home_join(".cache"))
    } else {
        None
    }
}

pub fn get_log_dir() -> Option<PathBuf> {
    data_base_dir().map(|dir| dir.join(APP_NAME).join(LOG_DIR))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "no data directory for logs")
    })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
