use log::debug;
use thiserror::Error;

use crate::models::{into_mapping, RepositoryEntry, RepositoryMapping};

/// Base of the GitHub "users" REST endpoints
pub const GITHUB_API_USERS: &str = "https://api.github.com/users";

/// Large enough that one request covers a personal account
pub const PAGE_SIZE: u32 = 1000;

const ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Can't retrieve repositories list from Github for '{account}': {message}")]
    Transport { account: String, message: String },

    #[error("Can't retrieve repositories list from Github for '{account}': HTTP {status}")]
    Status { account: String, status: u16 },

    #[error("Can't read repositories list from Github for '{account}': {message}")]
    Decode { account: String, message: String },
}

/// Source of an account's repository list
pub trait RepositoryLister {
    fn fetch(&self, account: &str) -> Result<RepositoryMapping, FetchError>;
}

#[derive(Debug, Clone)]
pub struct GitHubService {
    endpoint: String,
}

impl GitHubService {
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoint(GITHUB_API_USERS)
    }

    fn with_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn repositories_url(&self, account: &str) -> String {
        format!("{}/{}/repos?per_page={}", self.endpoint, account, PAGE_SIZE)
    }
}

impl Default for GitHubService {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryLister for GitHubService {
    fn fetch(&self, account: &str) -> Result<RepositoryMapping, FetchError> {
        let url = self.repositories_url(account);
        debug!("GET {url}");

        let response = ureq::get(&url)
            .set("Accept", ACCEPT)
            .set("User-Agent", concat!("gclone/", env!("CARGO_PKG_VERSION")))
            .call();

        let body = match response {
            Ok(response) => response.into_string().map_err(|e| FetchError::Transport {
                account: account.to_string(),
                message: e.to_string(),
            })?,
            Err(ureq::Error::Status(status, _)) => {
                return Err(FetchError::Status {
                    account: account.to_string(),
                    status,
                })
            }
            Err(ureq::Error::Transport(e)) => {
                return Err(FetchError::Transport {
                    account: account.to_string(),
                    message: e.to_string(),
                })
            }
        };

        parse_repositories(account, &body)
    }
}

/// Decode the JSON array returned by the list endpoint
pub fn parse_repositories(account: &str, body: &str) -> Result<RepositoryMapping, FetchError> {
    let entries: Vec<RepositoryEntry> =
        serde_json::from_str(body).map_err(|e| FetchError::Decode {
            account: account.to_string(),
            message: e.to_string(),
        })?;

    debug!("Decoded {} repositories for {account}", entries.len());
    Ok(into_mapping(entries))
}
