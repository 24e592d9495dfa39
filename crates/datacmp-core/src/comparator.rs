//! The recursive comparator and its cycle bookkeeping.
//!
//! [`Comparator::compare`] walks both values in lockstep. Scalars and handles
//! are compared by value or identity, collections and objects by their
//! sorted key sets and then key by key. Objects additionally go through
//! cycle detection before their fields are flattened.
//!
//! # Cycle detection
//!
//! Each object pair being flattened pushes a [`Visit`] frame recording the
//! left identity, the right identity, and the path length at which they were
//! entered. Frames live on the call stack and link to their parent, so a
//! branch sees exactly its own ancestors and siblings never see each other.
//! When both identities of a pair were already entered on the current
//! branch:
//!
//! - if either was entered exactly one segment above the current path, the
//!   object contains itself at the next level and comparison fails with
//!   [`CompareError::CircularSelfReference`];
//! - otherwise, if both were entered at the same path, the pair is treated
//!   as equal without descending;
//! - otherwise comparison continues structurally.

use std::borrow::Cow;

use indexmap::IndexMap;
use tracing::{debug, trace};

use datacmp_value::{Collection, Identity, Key, ObjectRef, Value};

use crate::config::CompareConfig;
use crate::error::{CompareError, CompareResult, Side};
use crate::path::Path;

/// Compares values under a fixed [`CompareConfig`].
#[derive(Clone, Debug, Default)]
pub struct Comparator {
    config: CompareConfig,
}

impl Comparator {
    pub fn new(config: CompareConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Skip keys and fields named `name` in later comparisons.
    pub fn ignore_key(&mut self, name: impl Into<String>) {
        self.config.ignored_keys.insert(name);
    }

    /// Stop skipping `name`. No-op if it was not ignored.
    pub fn unignore_key(&mut self, name: &str) {
        self.config.ignored_keys.remove(name);
    }

    /// Compare two values, failing with the first discrepancy found.
    ///
    /// Neither value is modified. Repeated calls with the same inputs give
    /// the same result.
    pub fn compare(&self, left: &Value, right: &Value) -> CompareResult<()> {
        compare_with(&self.config, left, right)
    }
}

/// Compare two values under an explicit configuration.
pub fn compare_with(config: &CompareConfig, left: &Value, right: &Value) -> CompareResult<()> {
    let mut walk = Walk {
        config,
        path: Path::new(),
    };
    let result = walk.value(left, right, None);
    if let Err(err) = &result {
        debug!(kind = ?err.kind(), path = %err.path(), "comparison found a discrepancy");
    }
    result
}

/// An object pair entered on the current branch.
struct Visit<'a> {
    left: Identity,
    right: Identity,
    /// Path length at which the pair was entered.
    depth: usize,
    parent: Option<&'a Visit<'a>>,
}

impl<'a> Visit<'a> {
    /// Path length of the nearest frame matching `matches`.
    fn seen_at(
        visits: Option<&'a Visit<'a>>,
        matches: impl Fn(&Visit<'_>) -> bool,
    ) -> Option<usize> {
        std::iter::successors(visits, |visit| visit.parent)
            .find(|visit| matches(*visit))
            .map(|visit| visit.depth)
    }
}

/// Entries of a collection or flattened object, keyed uniformly.
type Entries<'v> = IndexMap<Cow<'v, Key>, &'v Value>;

struct Walk<'c> {
    config: &'c CompareConfig,
    path: Path,
}

impl Walk<'_> {
    fn value(
        &mut self,
        left: &Value,
        right: &Value,
        visits: Option<&Visit<'_>>,
    ) -> CompareResult<()> {
        if identical(left, right) {
            return Ok(());
        }

        let (left_tag, right_tag) = (left.type_tag(), right.type_tag());
        if left_tag != right_tag {
            return Err(CompareError::TypeMismatch {
                left: left_tag,
                right: right_tag,
                path: self.path.clone(),
            });
        }

        match (left, right) {
            (Value::Collection(l), Value::Collection(r)) => {
                self.entries(&collection_entries(l), &collection_entries(r), visits)
            }
            (Value::Object(l), Value::Object(r)) => self.object(l, r, visits),
            // Same scalar or handle type, but not identical.
            _ => Err(CompareError::ValueMismatch {
                left: left.describe(),
                right: right.describe(),
                path: self.path.clone(),
            }),
        }
    }

    fn object(
        &mut self,
        left: &ObjectRef,
        right: &ObjectRef,
        visits: Option<&Visit<'_>>,
    ) -> CompareResult<()> {
        let depth = self.path.len();
        let (left_id, right_id) = (left.identity(), right.identity());
        trace!(class = %left.class(), depth, "comparing objects");

        let left_seen = Visit::seen_at(visits, |visit| visit.left == left_id);
        let right_seen = Visit::seen_at(visits, |visit| visit.right == right_id);

        if let (Some(left_seen), Some(right_seen)) = (left_seen, right_seen) {
            if depth == left_seen + 1 {
                return Err(self.self_reference(Side::Left, left_seen));
            }
            if depth == right_seen + 1 {
                return Err(self.self_reference(Side::Right, right_seen));
            }
            if left_seen == right_seen {
                debug!(
                    path = %self.path,
                    seen_at = %self.path.prefix(left_seen),
                    "cycle resolved as equal"
                );
                return Ok(());
            }
        }

        let frame = Visit {
            left: left_id,
            right: right_id,
            depth,
            parent: visits,
        };

        let (left_state, right_state) = (left.borrow(), right.borrow());
        let left_fields = field_entries(&left_state.field_map());
        let right_fields = field_entries(&right_state.field_map());
        self.entries(&left_fields, &right_fields, Some(&frame))
    }

    fn entries(
        &mut self,
        left: &Entries<'_>,
        right: &Entries<'_>,
        visits: Option<&Visit<'_>>,
    ) -> CompareResult<()> {
        let config = self.config;
        let ignored = &config.ignored_keys;

        let mut left_keys: Vec<&Key> = left
            .keys()
            .map(|k| &**k)
            .filter(|k| !ignored.skips(k))
            .collect();
        let mut right_keys: Vec<&Key> = right
            .keys()
            .map(|k| &**k)
            .filter(|k| !ignored.skips(k))
            .collect();
        left_keys.sort();
        right_keys.sort();

        if left_keys != right_keys {
            return Err(CompareError::KeySetMismatch {
                left: left_keys.into_iter().cloned().collect(),
                right: right_keys.into_iter().cloned().collect(),
                path: self.path.clone(),
            });
        }

        for (key, left_value) in left {
            let key: &Key = key;
            if ignored.skips(key) {
                continue;
            }
            // Present: the key sets are equal.
            let Some(right_value) = right.get(key) else {
                continue;
            };
            self.descend(key, left_value, right_value, visits)?;
        }

        Ok(())
    }

    fn descend(
        &mut self,
        key: &Key,
        left: &Value,
        right: &Value,
        visits: Option<&Visit<'_>>,
    ) -> CompareResult<()> {
        if let Some(limit) = self.config.max_depth {
            if self.path.len() >= limit {
                return Err(CompareError::DepthExceeded {
                    limit,
                    path: self.path.child(key),
                });
            }
        }

        self.path.push(key.clone());
        let result = self.value(left, right, visits);
        self.path.pop();
        result
    }

    fn self_reference(&self, side: Side, seen_at: usize) -> CompareError {
        CompareError::CircularSelfReference {
            side,
            first_seen: self.path.prefix(seen_at),
            path: self.path.clone(),
        }
    }
}

/// Same primitive value, or same handle or object identity.
///
/// Collections are never identical; they are always compared structurally.
fn identical(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Resource(a), Value::Resource(b)) => a == b,
        (Value::Function(a), Value::Function(b)) => a == b,
        (Value::Collection(_), Value::Collection(_)) => false,
        (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
        _ => false,
    }
}

fn collection_entries(collection: &Collection) -> Entries<'_> {
    collection.iter().map(|(k, v)| (Cow::Borrowed(k), v)).collect()
}

fn field_entries<'v>(fields: &IndexMap<&'v str, &'v Value>) -> Entries<'v> {
    fields
        .iter()
        .map(|(name, value)| (Cow::Owned(Key::from(*name)), *value))
        .collect()
}
