//! Application data paths, following platform conventions:
//! - macOS: ~/Library/Application Support/playground
//! - Linux: $XDG_DATA_HOME/playground or ~/.local/share/playground
//! - Windows: %APPDATA%\playground

use std::path::PathBuf;

const APP_NAME: &str = "playground";
const LOG_DIR: &str = "logs";
const PROJECTS_DIR: &str = "projects";
const SANDBOX_DIR: &str = "sandboxes";

pub fn get_app_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join("Library/Application Support")
                .join(APP_NAME)
        })
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            Some(PathBuf::from(xdg).join(APP_NAME))
        } else {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".local/share").join(APP_NAME))
        }
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(LOG_DIR))
}

pub fn get_projects_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(PROJECTS_DIR))
}

/// Base directory for directory-backed sandboxes; falls back to the temp dir.
pub fn default_sandbox_base() -> PathBuf {
    get_app_data_dir()
        .unwrap_or_else(|| std::env::temp_dir().join(APP_NAME))
        .join(SANDBOX_DIR)
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}
