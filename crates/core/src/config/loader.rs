//! Config path resolution
//!
//! Handles resolving paths for configuration and data files based on the
//! plugin's location.

use std::path::{Path, PathBuf};

use super::{ConfigError, ConfigResult};

/// Returns the sprust base directory by navigating up from the plugin binary.
///
/// The plugin is loaded from:
/// `<game>/addons/sprust/bin/sprust.so`
///
/// This navigates up 2 levels to reach:
/// `<game>/addons/sprust/`
pub fn sprust_base_dir() -> ConfigResult<PathBuf> {
    let exe = std::env::current_exe().map_err(ConfigError::IoError)?;
    base_dir_from(&exe)
}

fn base_dir_from(binary: &Path) -> ConfigResult<PathBuf> {
    // Navigate: sprust.so -> bin -> sprust
    binary
        .parent() // bin/
        .and_then(|p| p.parent()) // sprust/
        .map(PathBuf::from)
        .ok_or(ConfigError::NoConfigDirectory)
}

/// Returns the base configs directory.
///
/// Path: `addons/sprust/configs/`
pub fn configs_dir() -> ConfigResult<PathBuf> {
    Ok(sprust_base_dir()?.join("configs"))
}

/// Returns the data directory holding descriptor files.
///
/// Path: `addons/sprust/data/`
pub fn data_dir() -> ConfigResult<PathBuf> {
    Ok(sprust_base_dir()?.join("data"))
}

/// Returns the core framework config path.
///
/// Path: `addons/sprust/configs/core.toml`
pub fn core_config_path() -> ConfigResult<PathBuf> {
    Ok(configs_dir()?.join("core.toml"))
}

/// Resolve a registry file name against the data directory.
///
/// Absolute paths are returned unchanged.
pub fn registry_path(file: &Path) -> ConfigResult<PathBuf> {
    if file.is_absolute() {
        Ok(file.to_path_buf())
    } else {
        Ok(data_dir()?.join(file))
    }
}
