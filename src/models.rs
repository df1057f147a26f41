use indexmap::IndexMap;
use serde::Deserialize;

/// Repository name to clone URL, in the order the API returned them.
pub type RepositoryMapping = IndexMap<String, String>;

/// One element of the GitHub "list repositories for a user" response.
/// Only the fields we need are decoded; the rest are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryEntry {
    pub name: String,
    pub git_url: String,
}

/// Build a mapping from API entries, keeping their order.
///
/// A repeated name keeps its first position and takes the last URL.
#[must_use]
pub fn into_mapping(entries: Vec<RepositoryEntry>) -> RepositoryMapping {
    entries
        .into_iter()
        .map(|entry| (entry.name, entry.git_url))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, url: &str) -> RepositoryEntry {
        RepositoryEntry {
            name: name.to_string(),
            git_url: url.to_string(),
        }
    }

    #[test]
    fn test_into_mapping_keeps_response_order() {
        let mapping = into_mapping(vec![
            entry("zeta", "git://github.com/u/zeta.git"),
            entry("alpha", "git://github.com/u/alpha.git"),
        ]);

        let names: Vec<&str> = mapping.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_into_mapping_duplicate_name_keeps_position() {
        let mapping = into_mapping(vec![
            entry("a", "git://old/a.git"),
            entry("b", "git://x/b.git"),
            entry("a", "git://new/a.git"),
        ]);

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get_index(0).map(|(k, _)| k.as_str()), Some("a"));
        assert_eq!(mapping["a"], "git://new/a.git");
    }
}
