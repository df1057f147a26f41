use crate::ui;
use anyhow::Result;

/// Why `git clone` failed, judged from its stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneFailure {
    SshAuth,
    NotFound,
    Network,
    DirectoryExists,
    Other,
}

#[must_use]
pub fn classify_clone_error(stderr: &str) -> CloneFailure {
    if stderr.contains("Permission denied") || stderr.contains("publickey") {
        CloneFailure::SshAuth
    } else if stderr.contains("not found") || stderr.contains("does not exist") {
        CloneFailure::NotFound
    } else if stderr.contains("timed out")
        || stderr.contains("timeout")
        || stderr.contains("Could not resolve host")
        || stderr.contains("unable to connect")
    {
        CloneFailure::Network
    } else if stderr.contains("already exists") {
        CloneFailure::DirectoryExists
    } else {
        CloneFailure::Other
    }
}

/// Print recovery guidance for a failed clone and return the error
pub fn handle_clone_error(repo_name: &str, stderr: &str) -> Result<()> {
    ui::print_error("Error occured, while cloning repository..");

    match classify_clone_error(stderr) {
        CloneFailure::SshAuth => show_ssh_auth_error(repo_name),
        CloneFailure::NotFound => show_repo_not_found_error(repo_name),
        CloneFailure::Network => show_network_error(repo_name),
        CloneFailure::DirectoryExists => show_directory_exists_error(repo_name),
        CloneFailure::Other => show_generic_clone_error(repo_name, stderr),
    }
}

fn show_ssh_auth_error(repo_name: &str) -> Result<()> {
    println!("   • Test SSH connection: ssh -T git@github.com");
    println!("   • Check that your key is added to GitHub");
    anyhow::bail!("SSH authentication failed for repository '{repo_name}'")
}

fn show_repo_not_found_error(repo_name: &str) -> Result<()> {
    println!("   • The cached list may be stale: gclone --update-cache");
    println!("   • Ensure you have access to this repository");
    anyhow::bail!("Repository '{repo_name}' not found or inaccessible")
}

fn show_network_error(repo_name: &str) -> Result<()> {
    println!("   • Check internet connection");
    println!("   • Github no longer serves git:// URLs; try cloning over https");
    anyhow::bail!("Network error cloning repository '{repo_name}'")
}

fn show_directory_exists_error(repo_name: &str) -> Result<()> {
    println!("   • Remove or rename ./{repo_name}, or run from another directory");
    anyhow::bail!("Directory '{repo_name}' already exists")
}

fn show_generic_clone_error(repo_name: &str, stderr: &str) -> Result<()> {
    println!("   • Error: {}", stderr.trim());
    anyhow::bail!("Failed to clone repository '{repo_name}'")
}
