use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use url::Url;

use crate::{
    env::{load_env_file, Variables},
    transport::TransportOptions,
};

use super::loader::{LoadedConfig, ProfileConfig, TesthttpConfig};

/// Everything a run needs, after the config file, the selected profile and
/// command line overrides have been merged.
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    pub profile_name: Option<String>,
    pub base_url: Option<Url>,
    pub transport: TransportOptions,
    pub variables: Variables,
    pub env_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    config: Option<LoadedConfig>,
    requested_profile: Option<String>,
    explicit_env: Option<PathBuf>,
    explicit_base_url: Option<String>,
    explicit_timeout_ms: Option<u64>,
}

impl SettingsBuilder {
    pub fn new(config: Option<LoadedConfig>) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn profile(mut self, profile: Option<String>) -> Self {
        self.requested_profile = profile;
        self
    }

    /// Env file that replaces the one named by the config.
    pub fn env_file(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_env = path;
        self
    }

    pub fn base_url(mut self, base_url: Option<String>) -> Self {
        self.explicit_base_url = base_url;
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.explicit_timeout_ms = timeout_ms;
        self
    }

    pub fn build(&self) -> Result<RunSettings> {
        let empty = ProfileConfig::default();
        let (profile_name, profile) = match &self.config {
            Some(loaded) => resolve_profile(&loaded.config, self.requested_profile.as_deref())?
                .map(|(name, profile)| (Some(name), profile))
                .unwrap_or((None, &empty)),
            None if self.requested_profile.is_some() => {
                bail!("No configuration file to select a profile from")
            }
            None => (None, &empty),
        };
        let top = self.config.as_ref().map(|loaded| &loaded.config);

        let mut variables = Variables::new();
        if let Some(top) = top {
            variables.extend(top.variables.clone());
        }
        variables.extend(profile.variables.clone());

        let mut env_files = Vec::new();
        if let Some(env_path) = self.env_path(profile) {
            load_env_file(&env_path, &mut variables)?;
            env_files.push(env_path);
        }

        let base_url = self
            .explicit_base_url
            .as_deref()
            .or(profile.base_url.as_deref())
            .or(top.and_then(|top| top.base_url.as_deref()))
            .map(|raw| Url::parse(raw).with_context(|| format!("invalid base URL {raw}")))
            .transpose()?;

        let timeout = self
            .explicit_timeout_ms
            .or(profile.timeout_ms)
            .or(top.and_then(|top| top.timeout_ms))
            .map(Duration::from_millis);

        let mut headers = BTreeMap::new();
        if let Some(top) = top {
            headers.extend(top.default_headers.clone());
        }
        headers.extend(profile.default_headers.clone());

        Ok(RunSettings {
            profile_name,
            base_url,
            transport: TransportOptions {
                timeout,
                default_headers: headers.into_iter().collect(),
            },
            variables,
            env_files,
        })
    }

    fn env_path(&self, profile: &ProfileConfig) -> Option<PathBuf> {
        if let Some(explicit) = &self.explicit_env {
            return Some(explicit.clone());
        }
        let loaded = self.config.as_ref()?;
        profile
            .env
            .as_deref()
            .or(loaded.config.env.as_deref())
            .map(|name| resolve_relative(&loaded.dir, Path::new(name)))
    }
}

fn resolve_profile<'a>(
    config: &'a TesthttpConfig,
    requested: Option<&str>,
) -> Result<Option<(String, &'a ProfileConfig)>> {
    if let Some(name) = requested {
        return match config.profiles.get(name) {
            Some(profile) => Ok(Some((name.to_string(), profile))),
            None => bail!("Unknown profile: {name}"),
        };
    }

    if let Some(default) = &config.default_profile {
        return match config.profiles.get(default) {
            Some(profile) => Ok(Some((default.clone(), profile))),
            None => bail!("Default profile {default} is not defined"),
        };
    }

    Ok(None)
}

fn resolve_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
