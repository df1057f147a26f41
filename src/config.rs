use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::CacheStore;
use crate::ui;

/// Account listed when nothing else is configured
pub const DEFAULT_USER: &str = "rostegg";

/// Get the user's home directory
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Could not determine the home directory")
}

/// Get the path to the configuration file (~/.config/gclone.yaml)
pub fn config_path() -> Result<PathBuf> {
    Ok(home_dir()?.join(".config").join("gclone.yaml"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, alias = "allways_update_cache")]
    pub always_update_cache: bool,
    #[serde(default = "default_user")]
    pub default_user: String,
    /// Keys we don't recognise, written back untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            always_update_cache: false,
            default_user: default_user(),
            extra: BTreeMap::new(),
        }
    }
}

/// Reads and writes the persisted configuration document
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store backed by ~/.config/gclone.yaml
    pub fn from_home() -> Result<Self> {
        Ok(Self::new(config_path()?))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration, regenerating defaults when the file is
    /// missing or cannot be parsed
    pub fn load(&self) -> Result<Config> {
        debug!("Loading config from {}", self.path.display());

        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                ui::print_warning("Default config file not found, creating new...");
                return self.reset();
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read config file: {}", self.path.display())
                })
            }
        };

        match serde_yaml::from_slice::<Config>(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                debug!("Config parse error: {e}");
                ui::print_error("Can't open local config file, seems it corrupted, creating new...");
                self.reset()
            }
        }
    }

    fn reset(&self) -> Result<Config> {
        let config = Config::default();
        self.save(&config)?;
        Ok(config)
    }

    /// Overwrite the whole document with `config`
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = serde_yaml::to_string(config).context("Failed to serialize config")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write config file: {}", self.path.display()))?;

        Ok(())
    }

    /// Persist a new default account and drop the cached list, which
    /// belonged to the previous one
    pub fn set_default_user(&self, name: &str, cache: &CacheStore) -> Result<Config> {
        let mut config = self.load()?;
        config.default_user = name.to_string();
        self.save(&config)?;
        cache.clear()?;
        Ok(config)
    }

    /// Delete the configuration file. Returns false if there was none.
    pub fn clear(&self) -> Result<bool> {
        remove_if_exists(&self.path)
    }
}

/// Remove a file, treating "not found" as nothing to do
pub(crate) fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}
