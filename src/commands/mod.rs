use anyhow::Result;
use log::debug;
use std::process::ExitCode;

use crate::cache::CacheStore;
use crate::config::ConfigStore;
use crate::git::VersionControl;
use crate::github::RepositoryLister;
use crate::interactive::LineEditor;

pub mod maintenance;
pub mod select;

/// The flags a single run was invoked with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub update_cache: bool,
    pub clear_cache: bool,
    pub clear_config: bool,
    pub user: Option<String>,
    pub set_user: Option<String>,
}

impl Invocation {
    /// Treat `--user ""` and `--set-user ""` as if the flag was not given
    #[must_use]
    pub fn without_blank_names(mut self) -> Self {
        self.user = self.user.filter(|name| !name.trim().is_empty());
        self.set_user = self.set_user.filter(|name| !name.trim().is_empty());
        self
    }

    /// An explicit account always refreshes, since the cache may hold
    /// someone else's list
    #[must_use]
    pub const fn force_refresh(&self, always_update_cache: bool) -> bool {
        self.user.is_some() || self.update_cache || always_update_cache
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Cloned { name: String },
    ConfigUpdated { user: String },
    Cleared,
    Interrupted,
}

impl Outcome {
    /// Only a finished clone exits 0. The set-user and clear paths exit 1 even
    /// when they succeed; scripts in the wild may depend on it.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Cloned { .. } => ExitCode::SUCCESS,
            Self::ConfigUpdated { .. } | Self::Cleared | Self::Interrupted => ExitCode::FAILURE,
        }
    }
}

/// Wires the stores, the remote lister and git together for one run
pub struct Dispatcher<'a> {
    pub config: ConfigStore,
    pub cache: CacheStore,
    pub lister: &'a dyn RepositoryLister,
    pub vcs: &'a dyn VersionControl,
}

impl<'a> Dispatcher<'a> {
    #[must_use]
    pub fn new(
        config: ConfigStore,
        cache: CacheStore,
        lister: &'a dyn RepositoryLister,
        vcs: &'a dyn VersionControl,
    ) -> Self {
        Self {
            config,
            cache,
            lister,
            vcs,
        }
    }

    pub fn run(&self, invocation: &Invocation, editor: &mut dyn LineEditor) -> Result<Outcome> {
        self.vcs.check_available()?;

        if let Some(user) = &invocation.set_user {
            return maintenance::set_user(&self.config, &self.cache, user);
        }

        if invocation.clear_cache || invocation.clear_config {
            return maintenance::clear(
                &self.config,
                &self.cache,
                invocation.clear_cache,
                invocation.clear_config,
            );
        }

        let config = self.config.load()?;
        let account = invocation
            .user
            .clone()
            .unwrap_or_else(|| config.default_user.clone());
        let force_refresh = invocation.force_refresh(config.always_update_cache);
        debug!("Account: {account}, force refresh: {force_refresh}");

        let mapping = self.cache.read(self.lister, &account, force_refresh)?;
        select::run(&account, &mapping, self.vcs, editor)
    }
}
