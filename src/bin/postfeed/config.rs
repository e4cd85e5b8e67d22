use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use spdlog::info;

use postfeed::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()));
    let cur_dir = env::current_dir().ok();
    let cfg_dir = dirs::config_dir().map(|d| d.join("postfeed"));

    [exe_dir, cur_dir, cfg_dir].into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

/// An explicit path must exist. Otherwise the first `postfeed.toml` found
/// next to the executable, in the current directory or in the user config
/// directory is used, falling back to the built-in defaults.
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(get_config_path) {
        Some(path) => path,
        None => {
            info!("No {} found, using default configuration", CFG_FILE_NAME);
            return Ok(Config::default());
        }
    };

    info!("Reading config from {}", config_path.display());
    let config = read_config(&config_path)
        .with_context(|| format!("Could not load configuration {}", config_path.display()))?;

    Ok(config)
}
