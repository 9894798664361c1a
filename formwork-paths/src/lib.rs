//! XDG Base Directory paths for formwork.
//!
//! Terminal tools resolve XDG paths on every platform instead of the
//! platform-native locations, so the files end up where users of other CLI
//! tools expect them.

use std::path::{Path, PathBuf};

const APP: &str = "formwork";

/// Name of the log file written while the terminal UI owns the screen.
pub const LOG_FILE: &str = "formwork.log";

/// Get the formwork config directory.
///
/// Returns `$XDG_CONFIG_HOME/formwork` if set, otherwise `~/.config/formwork`.
///
/// # Examples
///
/// ```
/// use formwork_paths::config_dir;
///
/// let user_config = config_dir().join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    resolve(
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        dirs::home_dir(),
        ".config",
    )
}

/// Get the formwork data directory.
///
/// Returns `$XDG_DATA_HOME/formwork` if set, otherwise `~/.local/share/formwork`.
pub fn data_dir() -> PathBuf {
    resolve(
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        dirs::home_dir(),
        ".local/share",
    )
}

/// Where the terminal UI sends its tracing output.
pub fn log_file() -> PathBuf {
    data_dir().join(LOG_FILE)
}

/// An empty XDG variable counts as unset.
fn resolve(xdg: Option<PathBuf>, home: Option<PathBuf>, fallback: &str) -> PathBuf {
    match (xdg.filter(|p| !p.as_os_str().is_empty()), home) {
        (Some(base), _) => base.join(APP),
        (None, Some(home)) => home.join(fallback).join(APP),
        (None, None) => Path::new(fallback).join(APP),
    }
}
