use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use blogmeta::config::{read_config, Config};
use blogmeta::logger::default_log_location;

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    let candidates = [exe_dir, env::current_dir().ok(), dirs::config_dir()];

    candidates.into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(get_config_path) {
        Some(path) => path,
        None => return Err(anyhow!("Could not find {}. Please run blogmeta init or pass --config", CFG_FILE_NAME)),
    };

    println!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)
        .with_context(|| format!("Cannot use configuration {}", config_path.display()))?;

    if let Some(ref mut log) = config.log {
        if log.location.is_none() {
            log.location = default_log_location();
        }
        match log.location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None => println!("Log enabled. No log directory found, using stdout"),
        }
    } else {
        println!("Log disabled. Using stdout");
    }

    Ok(config)
}
