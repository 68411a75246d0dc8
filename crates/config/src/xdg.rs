//! XDG Base Directory support for quillcraft.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "quillcraft";

/// Returns `$XDG_CONFIG_HOME/quillcraft` or `~/.config/quillcraft`.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine config directory")
}

/// Returns `$XDG_CACHE_HOME/quillcraft` or `~/.cache/quillcraft`.
pub fn get_cache_dir() -> Result<PathBuf> {
    dirs::cache_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine cache directory")
}
