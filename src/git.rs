use anyhow::{Context, Result};
use log::debug;
use std::io::{self, Read, Write};
use std::process::{Command, ExitStatus, Output, Stdio};

use crate::error_handling;

/// The external version-control client
pub trait VersionControl {
    /// Fail if the client can't be run at all
    fn check_available(&self) -> Result<()>;

    /// Clone `url` into the current directory
    fn clone_repository(&self, name: &str, url: &str) -> Result<()>;
}

/// `git` found on PATH
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

/// Run a git command and return the output
pub fn run_git_command(args: &[&str]) -> Result<Output> {
    debug!("Running git {}", args.join(" "));

    Command::new("git")
        .args(args)
        .output()
        .with_context(|| format!("Failed to execute git command: git {}", args.join(" ")))
}

/// Run a git command with stdout inherited, copying its stderr to `echo` as
/// it arrives. Returns the exit status and everything written to stderr.
pub fn run_git_command_teed<W: Write>(
    args: &[&str],
    echo: &mut W,
) -> Result<(ExitStatus, String)> {
    debug!("Running git {}", args.join(" "));

    let mut child = Command::new("git")
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to execute git command: git {}", args.join(" ")))?;

    let mut captured = Vec::new();
    if let Some(mut pipe) = child.stderr.take() {
        let mut buf = [0u8; 4096];
        loop {
            let n = pipe.read(&mut buf).context("Failed to read git output")?;
            if n == 0 {
                break;
            }
            // Progress lines end in '\r', so flush every chunk
            echo.write_all(&buf[..n])?;
            echo.flush()?;
            captured.extend_from_slice(&buf[..n]);
        }
    }

    let status = child.wait().context("Failed to wait for git")?;
    Ok((status, String::from_utf8_lossy(&captured).into_owned()))
}

/// Check if git is available on the system
pub fn check_git_availability() -> Result<()> {
    Command::new("git")
        .args(["--version"])
        .output()
        .context("Seems, like git not installed..")?;
    Ok(())
}

impl VersionControl for GitCli {
    fn check_available(&self) -> Result<()> {
        check_git_availability()
    }

    fn clone_repository(&self, name: &str, url: &str) -> Result<()> {
        let (status, stderr) =
            run_git_command_teed(&["clone", "--progress", url], &mut io::stderr())?;

        if !status.success() {
            return error_handling::handle_clone_error(name, &stderr);
        }

        Ok(())
    }
}
