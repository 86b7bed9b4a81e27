pub mod ask;
pub mod doctor;
pub mod init;
pub mod models;
pub mod serve;

use std::path::{Path, PathBuf};

use vynce_config::AppConfig;
use vynce_core::{Error, Result};

/// The config file in effect: `--config` if given, else the default location.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"))
}

/// Load configuration with `.env` and environment overrides applied.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let path = config_path(explicit);
    AppConfig::load_with_env(&path).map_err(|e| Error::config(e.to_string()))
}
