//! Prefix completion over repository names.
//!
//! The line editor asks for matches one at a time (`complete(prefix, n)`)
//! and, when several names share the typed prefix, prints them with
//! `render_matches` before redrawing the prompt.

/// Sorted, de-duplicated repository names offered for completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    names: Vec<String>,
}

impl CandidateSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

pub trait Completer {
    /// The `state`-th name starting with `prefix`, in sorted order, or
    /// `None` once there are no more
    fn complete(&self, prefix: &str, state: usize) -> Option<&str>;

    /// All names starting with `prefix`
    fn matches(&self, prefix: &str) -> Vec<&str> {
        (0..).map_while(|state| self.complete(prefix, state)).collect()
    }

    /// Lay the matches for `prefix` out in columns no wider than `width`
    fn render_matches(&self, prefix: &str, width: usize) -> Vec<String> {
        layout_columns(&self.matches(prefix), width)
    }
}

impl Completer for CandidateSet {
    fn complete(&self, prefix: &str, state: usize) -> Option<&str> {
        // names are sorted, so every match sits in one run starting here
        let start = self.names.partition_point(|name| name.as_str() < prefix);
        self.names[start..]
            .iter()
            .take_while(|name| name.starts_with(prefix))
            .nth(state)
            .map(String::as_str)
    }
}

/// Column-wrapped block: every cell is padded to 1.2x the longest item and
/// a new line starts whenever the next cell would overflow `width`.
#[must_use]
pub fn layout_columns(items: &[&str], width: usize) -> Vec<String> {
    let Some(longest) = items.iter().map(|item| item.chars().count()).max() else {
        return Vec::new();
    };
    let cell = longest * 6 / 5;

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for item in items {
        let padded = format!("{item:<cell$}");
        let padded_len = padded.chars().count();
        if line_len + padded_len > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        line.push_str(&padded);
        line_len += padded_len;
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

/// Longest prefix shared by all `items`
#[must_use]
pub fn common_prefix<'a>(items: &[&'a str]) -> &'a str {
    let Some((first, rest)) = items.split_first() else {
        return "";
    };

    let mut end = first.len();
    for item in rest {
        end = first
            .char_indices()
            .zip(item.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((i, c), _)| i + c.len_utf8())
            .min(end);
    }

    &first[..end]
}
