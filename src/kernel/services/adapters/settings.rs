//! 设置文件与缓存目录
//!
//! - 设置：`<cache>/.zread/setting.json`
//! - 日志：`<cache>/.zread/logs/`

use crate::kernel::services::ports::settings::Settings;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".zread";
const SETTINGS_FILE: &str = "setting.json";
const LOG_DIR: &str = "logs";

pub fn get_app_dir() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(APP_DIR))
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_app_dir().map(|dir| dir.join(SETTINGS_FILE))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_app_dir().map(|dir| dir.join(LOG_DIR))
}

pub fn ensure_log_dir() -> io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Cannot determine log directory")
    })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn ensure_settings_file() -> io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    ensure_settings_file_at(&path)?;
    Ok(path)
}

/// Write defaults to `path` unless a file is already there.
pub fn ensure_settings_file_at(path: &Path) -> io::Result<()> {
    if path.exists() {
        return Ok(());
    }
    save_settings_to(path, &Settings::default())
}

pub fn load_settings() -> Option<Settings> {
    load_settings_from(&get_settings_path()?)
}

/// `None` when the file is missing or not valid JSON; unknown and missing fields are
/// tolerated.
pub fn load_settings_from(path: &Path) -> Option<Settings> {
    let data = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings file");
            None
        }
    }
}

pub fn save_settings(settings: &Settings) -> io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    save_settings_to(&path, settings)?;
    Ok(path)
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(settings).map_err(io::Error::other)?;
    std::fs::write(path, content)
}

fn get_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            if !xdg.is_empty() {
                return Some(PathBuf::from(xdg));
            }
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
