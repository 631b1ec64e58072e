//! Inclusion filters: the set of dotted paths that survive row expansion

use std::collections::BTreeSet;

/// A set of dot-joined inclusion paths such as `"F0004.C0002"`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    paths: BTreeSet<String>,
}

impl Filter {
    pub fn new() -> Self {
        Filter::default()
    }

    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma-separated list, ignoring blanks
    pub fn parse_list(list: &str) -> Self {
        Self::from_paths(
            list.split(',')
                .map(str::trim)
                .filter(|path| !path.is_empty()),
        )
    }

    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.paths.insert(path.into())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// `path` is named exactly by the filter
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// `path` is named exactly, or is a strict ancestor of a named path
    pub fn admits(&self, path: &str) -> bool {
        if self.contains(path) {
            return true;
        }
        let dotted = format!("{}.", path);
        self.paths
            .range(dotted.clone()..)
            .next()
            .is_some_and(|entry| entry.starts_with(&dotted))
    }
}

/// Path of `key` below `parent`; the root has no leading dot
pub(crate) fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Trailing field name of a dotted path
pub(crate) fn bare_name(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}
