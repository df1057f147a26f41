use anyhow::Result;
use log::debug;

use super::Outcome;
use crate::cache::CacheStore;
use crate::config::ConfigStore;
use crate::ui::{self, Colors};

/// `--set-user NAME`: store a new default account and drop the old list
pub fn set_user(config: &ConfigStore, cache: &CacheStore, user: &str) -> Result<Outcome> {
    config.set_default_user(user, cache)?;

    ui::print_success(&format!(
        "Created new config for {}{}",
        Colors::BLUE,
        user
    ));

    Ok(Outcome::ConfigUpdated {
        user: user.to_string(),
    })
}

/// `--clear-cache` / `--clear-config`
pub fn clear(
    config: &ConfigStore,
    cache: &CacheStore,
    clear_cache: bool,
    clear_config: bool,
) -> Result<Outcome> {
    if clear_cache {
        let removed = cache.clear()?;
        debug!("Cache file {} removed: {removed}", cache.path().display());
        ui::print_success("Cached repositories was succesfuly removed...");
    }

    if clear_config {
        let removed = config.clear()?;
        debug!("Config file {} removed: {removed}", config.path().display());
        ui::print_success("Config file was succesfuly removed...");
    }

    Ok(Outcome::Cleared)
}
