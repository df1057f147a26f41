use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use gclone::cache::CacheStore;
use gclone::commands::{Dispatcher, Invocation, Outcome};
use gclone::config::ConfigStore;
use gclone::git::GitCli;
use gclone::github::GitHubService;
use gclone::interactive::TerminalPrompt;
use gclone::ui;

#[derive(Parser)]
#[command(name = "gclone")]
#[command(about = "List a GitHub user's repositories and clone one of them")]
#[command(version)]
#[command(
    long_about = "List a GitHub user's repositories and clone one of them.\n\nThe list is cached in ~/.cache/gclone_cache.yaml; the default account lives in ~/.config/gclone.yaml. Type a repository name at the prompt, with Tab completion."
)]
struct Cli {
    /// Update cached repositories list
    #[arg(long)]
    update_cache: bool,

    /// Delete cached repositories list
    #[arg(long)]
    clear_cache: bool,

    /// Delete config file
    #[arg(long)]
    clear_config: bool,

    /// GitHub username to list instead of the default one
    #[arg(long, value_name = "NAME")]
    user: Option<String>,

    /// Set the default GitHub username
    #[arg(long, value_name = "NAME")]
    set_user: Option<String>,
}

impl From<Cli> for Invocation {
    fn from(cli: Cli) -> Self {
        Self {
            update_cache: cli.update_cache,
            clear_cache: cli.clear_cache,
            clear_config: cli.clear_config,
            user: cli.user,
            set_user: cli.set_user,
        }
    }
}

fn run(invocation: &Invocation) -> Result<Outcome> {
    let lister = GitHubService::new();
    let git = GitCli;
    let dispatcher = Dispatcher::new(
        ConfigStore::from_home()?,
        CacheStore::from_home()?,
        &lister,
        &git,
    );

    dispatcher.run(invocation, &mut TerminalPrompt::new())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let invocation = Invocation::from(Cli::parse()).without_blank_names();

    match run(&invocation) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            ui::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
