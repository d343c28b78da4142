use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "testhttp.json";

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileConfig {
    pub base_url: Option<String>,
    pub env: Option<String>,
    pub timeout_ms: Option<u64>,
    pub default_headers: HashMap<String, String>,
    pub variables: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TesthttpConfig {
    pub default_profile: Option<String>,
    pub profiles: HashMap<String, ProfileConfig>,
    pub base_url: Option<String>,
    pub env: Option<String>,
    pub timeout_ms: Option<u64>,
    pub default_headers: HashMap<String, String>,
    pub variables: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: TesthttpConfig,
    pub path: PathBuf,
    pub dir: PathBuf,
}

/// Loads `testhttp.json` from `target`, which may be the file itself or the
/// directory holding it. A missing file is not an error.
pub fn load_config(target: &Path) -> Result<Option<LoadedConfig>> {
    let resolved = if target.is_absolute() {
        target.to_path_buf()
    } else {
        std::env::current_dir()?.join(target)
    };

    let (file_path, dir) = if resolved.is_dir() {
        (resolved.join(CONFIG_FILE_NAME), resolved)
    } else {
        let dir = match resolved.parent() {
            Some(parent) => parent.to_path_buf(),
            None => std::env::current_dir()?,
        };
        (resolved, dir)
    };

    if !file_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&file_path)
        .with_context(|| format!("reading config {}", file_path.display()))?;

    let config: TesthttpConfig = serde_json::from_str(&contents)
        .with_context(|| format!("parsing config {}", file_path.display()))?;

    Ok(Some(LoadedConfig {
        config,
        path: file_path,
        dir,
    }))
}
