use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{home_dir, remove_if_exists};
use crate::github::RepositoryLister;
use crate::models::RepositoryMapping;
use crate::ui;

/// Get the path to the cache file (~/.cache/gclone_cache.yaml)
pub fn cache_path() -> Result<PathBuf> {
    Ok(home_dir()?.join(".cache").join("gclone_cache.yaml"))
}

/// What we found on disk when trying to reuse the cached list
#[derive(Debug)]
pub enum CacheLoad {
    Loaded(RepositoryMapping),
    Missing,
    Corrupt(String),
}

/// Persists the most recently fetched repository list.
///
/// The record does not remember which account it was fetched for; changing
/// the default account deletes it instead.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store backed by ~/.cache/gclone_cache.yaml
    pub fn from_home() -> Result<Self> {
        Ok(Self::new(cache_path()?))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the repository list for `account`, reusing the cache unless a
    /// refresh is forced or the cache can't be used
    pub fn read(
        &self,
        lister: &dyn RepositoryLister,
        account: &str,
        force_refresh: bool,
    ) -> Result<RepositoryMapping> {
        if force_refresh {
            debug!("Cache refresh forced for {account}");
            return self.refresh(lister, account);
        }

        match self.load()? {
            CacheLoad::Loaded(mapping) => {
                debug!("Using {} cached repositories", mapping.len());
                Ok(mapping)
            }
            CacheLoad::Missing => {
                ui::print_warning("Can't find local cache, retrieve repositories list from Github...");
                self.refresh(lister, account)
            }
            CacheLoad::Corrupt(reason) => {
                debug!("Cache parse error: {reason}");
                ui::print_warning("Can't open local cache, seems it corrupted, creating new...");
                self.refresh(lister, account)
            }
        }
    }

    /// Fetch a fresh list and overwrite the cache with it
    pub fn refresh(
        &self,
        lister: &dyn RepositoryLister,
        account: &str,
    ) -> Result<RepositoryMapping> {
        ui::print_success("Updating repositories list from Github...");
        let mapping = lister.fetch(account)?;
        self.write(&mapping)?;
        Ok(mapping)
    }

    /// Read the cache file without falling back to the network
    pub fn load(&self) -> Result<CacheLoad> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(CacheLoad::Missing),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read cache file: {}", self.path.display()))
            }
        };

        Ok(match serde_yaml::from_slice::<RepositoryMapping>(&content) {
            Ok(mapping) => CacheLoad::Loaded(mapping),
            Err(e) => CacheLoad::Corrupt(e.to_string()),
        })
    }

    /// Replace the cache file with `mapping`
    pub fn write(&self, mapping: &RepositoryMapping) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create cache directory: {}", parent.display())
            })?;
        }

        let content =
            serde_yaml::to_string(mapping).context("Failed to serialize repository list")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write cache file: {}", self.path.display()))?;

        debug!("Wrote {} repositories to {}", mapping.len(), self.path.display());
        Ok(())
    }

    /// Delete the cache file. Returns false if there was none.
    pub fn clear(&self) -> Result<bool> {
        remove_if_exists(&self.path)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::github::FetchError;
    use std::cell::{Cell, RefCell};
    use tempfile::TempDir;

    /// Lister that hands out a fixed list and counts calls
    pub struct FakeLister {
        pub mapping: RepositoryMapping,
        pub calls: Cell<usize>,
        pub accounts: RefCell<Vec<String>>,
    }

    impl FakeLister {
        pub fn new(pairs: &[(&str, &str)]) -> Self {
            Self {
                mapping: pairs
                    .iter()
                    .map(|(name, url)| ((*name).to_string(), (*url).to_string()))
                    .collect(),
                calls: Cell::new(0),
                accounts: RefCell::new(Vec::new()),
            }
        }
    }

    impl RepositoryLister for FakeLister {
        fn fetch(&self, account: &str) -> std::result::Result<RepositoryMapping, FetchError> {
            self.calls.set(self.calls.get() + 1);
            self.accounts.borrow_mut().push(account.to_string());
            Ok(self.mapping.clone())
        }
    }

    struct FailingLister;

    impl RepositoryLister for FailingLister {
        fn fetch(&self, account: &str) -> std::result::Result<RepositoryMapping, FetchError> {
            Err(FetchError::Status {
                account: account.to_string(),
                status: 404,
            })
        }
    }

    fn store_in(dir: &TempDir) -> CacheStore {
        CacheStore::new(dir.path().join(".cache").join("gclone_cache.yaml"))
    }

    #[test]
    fn test_cached_mapping_is_reused_without_fetch() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{"foo": "git://x/foo.git"}"#).unwrap();
        let lister = FakeLister::new(&[("other", "git://x/other.git")]);

        let mapping = store.read(&lister, "rostegg", false).unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping["foo"], "git://x/foo.git");
        assert_eq!(lister.calls.get(), 0);
    }

    #[test]
    fn test_write_then_read_round_trip_keeps_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let lister = FakeLister::new(&[]);
        let mapping: RepositoryMapping = [("zeta", "git://x/z.git"), ("alpha", "git://x/a.git")]
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();

        store.write(&mapping).unwrap();
        let read_back = store.read(&lister, "rostegg", false).unwrap();

        assert_eq!(read_back, mapping);
        let names: Vec<&String> = read_back.keys().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(lister.calls.get(), 0);
    }

    #[test]
    fn test_missing_cache_fetches_and_writes() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let lister = FakeLister::new(&[("repo", "git://x/repo.git")]);

        let mapping = store.read(&lister, "octocat", false).unwrap();
        assert_eq!(mapping["repo"], "git://x/repo.git");
        assert_eq!(lister.calls.get(), 1);
        assert_eq!(*lister.accounts.borrow(), vec!["octocat".to_string()]);
        assert!(matches!(store.load().unwrap(), CacheLoad::Loaded(m) if m == mapping));
    }

    #[test]
    fn test_corrupt_cache_fetches() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "- just\n- a list\n").unwrap();
        assert!(matches!(store.load().unwrap(), CacheLoad::Corrupt(_)));

        let lister = FakeLister::new(&[("repo", "git://x/repo.git")]);
        let mapping = store.read(&lister, "octocat", false).unwrap();
        assert_eq!(lister.calls.get(), 1);
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_cache_with_invalid_utf8_fetches() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), b"foo: \xff\n").unwrap();
        assert!(matches!(store.load().unwrap(), CacheLoad::Corrupt(_)));

        let lister = FakeLister::new(&[("repo", "git://x/repo.git")]);
        let mapping = store.read(&lister, "u", false).unwrap();
        assert_eq!(lister.calls.get(), 1);
        assert_eq!(mapping["repo"], "git://x/repo.git");
        assert!(matches!(store.load().unwrap(), CacheLoad::Loaded(m) if m == mapping));
    }

    #[test]
    fn test_forced_refresh_overwrites_cache() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "stale: git://x/stale.git\n").unwrap();
        let lister = FakeLister::new(&[("fresh", "git://x/fresh.git")]);

        let mapping = store.read(&lister, "octocat", true).unwrap();
        assert_eq!(lister.calls.get(), 1);
        assert!(mapping.contains_key("fresh"));
        assert!(!mapping.contains_key("stale"));

        let written = fs::read_to_string(store.path()).unwrap();
        assert!(!written.contains("stale"));
    }

    #[test]
    fn test_fetch_failure_leaves_cache_untouched() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "kept: git://x/kept.git\n").unwrap();

        let result = store.read(&FailingLister, "nobody", true);
        assert!(result.is_err());
        let written = fs::read_to_string(store.path()).unwrap();
        assert!(written.contains("kept"));
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(!store.clear().unwrap());
        store.write(&RepositoryMapping::new()).unwrap();
        assert!(store.clear().unwrap());
        assert!(matches!(store.load().unwrap(), CacheLoad::Missing));
    }

    #[test]
    fn test_read_after_clear_always_fetches() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let lister = FakeLister::new(&[("repo", "git://x/repo.git")]);
        store.write(&lister.mapping).unwrap();

        store.clear().unwrap();
        store.read(&lister, "octocat", false).unwrap();
        assert_eq!(lister.calls.get(), 1);
    }
}
