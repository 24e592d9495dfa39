//! Comparison paths: where in the compared structures a value sits.

use std::fmt;

use datacmp_value::Key;

/// Sequence of keys and field names leading from the comparison roots to
/// the value being compared. Displays as the segments joined with `.`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Key>);

impl Path {
    /// The empty path, naming the roots.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Key] {
        &self.0
    }

    pub fn push(&mut self, key: Key) {
        self.0.push(key);
    }

    pub fn pop(&mut self) -> Option<Key> {
        self.0.pop()
    }

    /// The first `len` segments.
    pub fn prefix(&self, len: usize) -> Path {
        Path(self.0[..len.min(self.0.len())].to_vec())
    }

    /// This path extended by `key`.
    pub fn child(&self, key: &Key) -> Path {
        let mut path = self.clone();
        path.push(key.clone());
        path
    }

    /// ` at "a.b"`, or nothing for the empty path.
    pub fn location(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" at \"{self}\"")
        }
    }

    /// Like [`Path::location`], but names the empty path ` at the root`.
    pub fn location_or_root(&self) -> String {
        if self.is_empty() {
            " at the root".to_string()
        } else {
            self.location()
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

impl From<Vec<Key>> for Path {
    fn from(keys: Vec<Key>) -> Self {
        Self(keys)
    }
}

impl FromIterator<Key> for Path {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
