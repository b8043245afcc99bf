// config.rs
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_NAME: &str = ".merge_wiper";
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder offered when the operator leaves the output folder blank.
    pub default_output_dir: Option<PathBuf>,
    pub merge_default_name: String,
    pub wipe_default_name: String,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_output_dir: None,
            merge_default_name: "merge_result".to_string(),
            wipe_default_name: "wipe_result".to_string(),
            log_filter: "warn".to_string(),
        }
    }
}

/// `$HOME/.merge_wiper/config.json`, falling back to `USERPROFILE`.
pub fn default_config_path() -> Option<PathBuf> {
    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .ok()?;
    Some(
        Path::new(&home)
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME),
    )
}

/// Reads the config at `path`, writing the defaults there first if it is missing.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| Error::io(e, dir))?;
        }
        let config = Config::default();
        let serialized = serde_json::to_string_pretty(&config)?;
        fs::write(path, serialized).map_err(|e| Error::io(e, path))?;
        return Ok(config);
    }

    let contents = fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_json::from_str(&contents)?)
}
