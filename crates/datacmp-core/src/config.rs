use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use datacmp_value::Key;

/// Default ceiling on path length during a comparison.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Names of keys and fields skipped during comparison, at any depth and on
/// both sides.
///
/// A name matches string keys and field names equal to it, and integer keys
/// whose decimal form equals it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoredKeys(BTreeSet<String>);

impl IgnoredKeys {
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Add a name. Adding a name twice has no further effect.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    /// Remove a name. Removing an absent name is a no-op.
    pub fn remove(&mut self, name: &str) -> bool {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Returns `true` if `key` must be skipped.
    pub fn skips(&self, key: &Key) -> bool {
        match key {
            Key::Str(s) => self.0.contains(s.as_str()),
            Key::Int(_) => self.0.iter().any(|name| key.matches_name(name)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoredKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Configuration threaded through a single comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Keys and field names skipped at every depth.
    pub ignored_keys: IgnoredKeys,
    /// Maximum path length before the comparison fails with
    /// `DepthExceeded`. `None` disables the ceiling.
    pub max_depth: Option<usize>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            ignored_keys: IgnoredKeys::new(),
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl CompareConfig {
    /// No ignored keys and no depth ceiling.
    ///
    /// Asymmetric cyclic graphs that never resolve into a detected loop can
    /// recurse until the stack is exhausted under this configuration.
    pub fn unbounded() -> Self {
        Self {
            max_depth: None,
            ..Default::default()
        }
    }

    /// Add a name to the ignored keys.
    pub fn ignoring(mut self, name: impl Into<String>) -> Self {
        self.ignored_keys.insert(name);
        self
    }

    /// Replace the ignored keys.
    pub fn with_ignored_keys(mut self, ignored_keys: IgnoredKeys) -> Self {
        self.ignored_keys = ignored_keys;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}
