//! Filesystem helpers for agentwire.

use std::path::{Path, PathBuf};

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `AGENTWIRE_DATA_DIR` environment variable
/// 2. `~/.agentwire`
/// 3. `./.agentwire` when no home directory is known
pub fn resolve_data_dir() -> PathBuf {
    data_dir_from(std::env::var("AGENTWIRE_DATA_DIR").ok(), dirs::home_dir())
}

fn data_dir_from(env_dir: Option<String>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = env_dir.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }

    if let Some(home) = home {
        return home.join(".agentwire");
    }

    PathBuf::from(".agentwire")
}

/// Resolve a path from config relative to the data directory.
///
/// Absolute paths are returned unchanged.
pub fn resolve_in_data_dir(data_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}
