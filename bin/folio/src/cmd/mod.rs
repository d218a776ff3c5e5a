//! Command implementations.
//!
//! Every command resolves `content/` and `data/` next to the configuration
//! file, so `folio -c site/config.toml build` works from any directory.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;

pub mod build;
pub mod check;
pub mod search;
pub mod tags;

/// Directories of a site rooted at the configuration file's directory.
#[derive(Debug, Clone)]
pub struct SitePaths {
    pub root: PathBuf,
    pub content: PathBuf,
    pub data: PathBuf,
}

impl SitePaths {
    pub fn from_config_path(config_path: &Path) -> Self {
        let root = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self {
            content: root.join("content"),
            data: root.join("data"),
            root,
        }
    }
}

/// Load the configuration, applying `FOLIO__*` environment overrides.
pub fn load_config(config_path: &Path) -> Result<Config> {
    Config::load_with_env(config_path)
        .wrap_err_with(|| format!("Failed to load configuration from {}", config_path.display()))
}
