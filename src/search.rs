use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

pub struct RepositorySearch {
    matcher: SkimMatcherV2,
}

impl RepositorySearch {
    #[must_use]
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Names fuzzily matching `query`, best first, at most `limit` of them
    pub fn suggest<'a, I>(&self, names: I, query: &str, limit: usize) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(&str, i64)> = names
            .into_iter()
            .filter_map(|name| {
                self.matcher
                    .fuzzy_match(name, query)
                    .map(|score| (name, score))
            })
            .collect();

        // Higher scores first; ties keep name order
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        matches.truncate(limit);

        matches.into_iter().map(|(name, _)| name).collect()
    }
}

impl Default for RepositorySearch {
    fn default() -> Self {
        Self::new()
    }
}
