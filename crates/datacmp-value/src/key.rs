use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of a [`Collection`](crate::Collection) entry or flattened object field.
///
/// Keys are totally ordered across both variants: every integer key sorts
/// before every string key, integers compare numerically and strings
/// bytewise. Sorted key sets are therefore comparable regardless of the
/// insertion order of either side.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// Returns `true` if this key is named `name`.
    ///
    /// Integer keys match their decimal form, so `"1"` names `Key::Int(1)`.
    pub fn matches_name(&self, name: &str) -> bool {
        match self {
            Key::Str(s) => s == name,
            Key::Int(i) => i.to_string() == name,
        }
    }

    /// The string payload, if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Int(_) => None,
        }
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Int(a), Key::Int(b)) => a.cmp(b),
            (Key::Int(_), Key::Str(_)) => Ordering::Less,
            (Key::Str(_), Key::Int(_)) => Ordering::Greater,
            (Key::Str(a), Key::Str(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{i}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}
