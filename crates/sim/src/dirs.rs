//! Platform-specific directory utilities.

use std::path::{Path, PathBuf};

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "battle-sim")
}

/// Directory for diagnostics logs.
///
/// Uses `configured` when given, otherwise the platform cache directory
/// (`~/.cache/battle-sim/logs` on Linux), falling back to `/tmp/battle-sim/logs`.
pub fn log_dir(configured: Option<&Path>) -> PathBuf {
    if let Some(dir) = configured {
        return dir.to_path_buf();
    }
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/battle-sim"))
        .join("logs")
}

/// Directory searched for talent icons.
///
/// Platform data directory (`~/.local/share/battle-sim/icons` on Linux),
/// falling back to `./assets/icons`.
pub fn icon_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("icons"))
        .unwrap_or_else(|| PathBuf::from("./assets/icons"))
}
