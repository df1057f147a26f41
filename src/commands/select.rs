use anyhow::Result;
use log::debug;

use super::Outcome;
use crate::completion::CandidateSet;
use crate::git::VersionControl;
use crate::interactive::{LineEditor, ReadOutcome};
use crate::models::RepositoryMapping;
use crate::search::RepositorySearch;
use crate::ui::{self, Colors};

const PROMPT: &str = "> ";
const MAX_SUGGESTIONS: usize = 3;

/// List the repositories, then keep asking for a name until one resolves
/// and is cloned, or the user gives up
pub fn run(
    account: &str,
    mapping: &RepositoryMapping,
    vcs: &dyn VersionControl,
    editor: &mut dyn LineEditor,
) -> Result<Outcome> {
    show_repositories(account, mapping);

    let candidates = CandidateSet::new(mapping.keys().map(String::as_str));
    let search = RepositorySearch::new();

    loop {
        println!("\nEnter repository name:\n\t");

        let input = match editor.read_line(PROMPT, &candidates)? {
            ReadOutcome::Line(input) => input,
            ReadOutcome::Interrupted | ReadOutcome::Eof => return Ok(Outcome::Interrupted),
        };
        let name = input.trim();

        let Some(url) = mapping.get(name) else {
            println!();
            ui::print_error("Can't find repository in list, try again!");
            let suggestions = search.suggest(candidates.iter(), name, MAX_SUGGESTIONS);
            if !suggestions.is_empty() {
                println!("    Did you mean: {}", suggestions.join(", "));
            }
            continue;
        };

        debug!("Resolved {name} to {url}");
        vcs.clone_repository(name, url)?;
        ui::print_success(&format!("Cloned {name} into ./{name}"));
        return Ok(Outcome::Cloned {
            name: name.to_string(),
        });
    }
}

fn show_repositories(account: &str, mapping: &RepositoryMapping) {
    println!();
    println!(
        "[+] Available repositories for {}:\n",
        ui::paint(account, Colors::BLUE)
    );

    if mapping.is_empty() {
        ui::print_warning(&format!("No repositories found for {account}"));
        return;
    }

    for name in mapping.keys() {
        println!("\t{}", ui::paint(name, Colors::BOLD));
    }
}
