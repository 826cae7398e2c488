use std::path::{Path, PathBuf};

/// Environment variable that relocates the config directory (tests, portable installs)
pub const CONFIG_DIR_ENV: &str = "MONTAGE_CONFIG_DIR";

/// Get the home directory, with fallback to "/"
pub fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Get the config directory path (~/.config/montage unless `MONTAGE_CONFIG_DIR` is set)
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    get_home_dir().join(".config").join("montage")
}

/// Get the config file path
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Get the session file path (persisted `access_token` / `loggedInUser`)
pub fn get_session_path() -> PathBuf {
    get_config_dir().join("session.json")
}

/// Get the directory log files are written to
pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(get_home_dir)
        .join("montage")
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    get_log_dir().join("montage.log")
}

/// Expand a path string, handling ~ and relative paths
///
/// Relative paths are resolved against the current working directory,
/// which is what a user typing `montage upload photo.png` expects.
pub fn expand_path(path_str: &str) -> PathBuf {
    if path_str == "~" {
        get_home_dir()
    } else if let Some(rest) = path_str.strip_prefix("~/") {
        get_home_dir().join(rest)
    } else {
        let path = Path::new(path_str);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    }
}

/// Format a path for display (show ~ for home)
pub fn format_path_for_display(path: &Path) -> String {
    let home_dir = get_home_dir();

    if let Ok(relative) = path.strip_prefix(&home_dir) {
        if relative.as_os_str().is_empty() {
            "~".to_string()
        } else {
            format!("~/{}", relative.to_string_lossy())
        }
    } else {
        path.to_string_lossy().to_string()
    }
}
