//! Path utilities for paddock.
//!
//! The config file is looked up in order:
//! - `./paddock.toml` - per-project configuration
//! - `~/.paddock/paddock.toml` - per-user configuration

use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "paddock.toml";

/// Returns the paddock home directory (`~/.paddock/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".paddock")
}

/// Returns the first existing config candidate, or `./paddock.toml`.
pub fn default_config() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return local;
    }
    let user = home_dir().join(CONFIG_FILE);
    if user.exists() {
        return user;
    }
    local
}

/// Resolve `--config`, reporting whether the path was given explicitly.
pub fn resolve_config(explicit: Option<&Path>) -> (PathBuf, bool) {
    match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (default_config(), false),
    }
}
