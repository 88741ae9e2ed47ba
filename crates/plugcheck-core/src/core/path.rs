use crate::core::error::{PlugcheckError, PlugcheckResult};
use std::path::{Path, PathBuf};

/// File name of the module manifest that sits next to a lock file.
pub const MANIFEST_NAME: &str = "go.mod";

/// Default lock file analyzed when none is given.
pub const DEFAULT_SUM_FILE: &str = "./go.sum";

/// Get the plugcheck home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\plugcheck
/// - Linux: ~/.config/plugcheck
/// - macOS: ~/Library/Application Support/plugcheck
pub fn plugcheck_home() -> PlugcheckResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| PlugcheckError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("plugcheck"))
}

/// Get the config file path (`<plugcheck_home>/config.yaml`)
pub fn config_file() -> PlugcheckResult<PathBuf> {
    Ok(plugcheck_home()?.join("config.yaml"))
}

/// Path of the manifest belonging to a lock file: the `go.mod` in the same directory.
pub fn manifest_for(sum_file: &Path) -> PathBuf {
    match sum_file.parent() {
        Some(dir) => dir.join(MANIFEST_NAME),
        None => PathBuf::from(MANIFEST_NAME),
    }
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> PlugcheckResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
