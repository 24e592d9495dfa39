//! Process-wide ignored-key set.
//!
//! [`compare`] snapshots the set under a read lock at call time, so
//! concurrent [`ignore_key`] / [`unignore_key`] calls never affect a
//! comparison already in progress. Code that can pass its configuration
//! explicitly should use [`Comparator`](crate::Comparator) instead.

use std::sync::RwLock;

use tracing::debug;

use datacmp_value::Value;

use crate::comparator::compare_with;
use crate::config::{CompareConfig, IgnoredKeys};
use crate::error::CompareResult;

static IGNORED_KEYS: RwLock<IgnoredKeys> = RwLock::new(IgnoredKeys::new());

/// Skip keys and fields named `name` in every later [`compare`] call.
pub fn ignore_key(name: impl Into<String>) {
    let name = name.into();
    debug!(key = %name, "ignoring key");
    IGNORED_KEYS.write().expect("lock poisoned").insert(name);
}

/// Stop skipping `name`. No-op if it was not ignored.
pub fn unignore_key(name: &str) {
    if IGNORED_KEYS.write().expect("lock poisoned").remove(name) {
        debug!(key = %name, "no longer ignoring key");
    }
}

/// Snapshot of the currently ignored names.
pub fn ignored_keys() -> IgnoredKeys {
    IGNORED_KEYS.read().expect("lock poisoned").clone()
}

/// Forget every ignored name.
pub fn clear_ignored_keys() {
    IGNORED_KEYS.write().expect("lock poisoned").clear();
}

/// Compare two values using the process-wide ignored keys and the default
/// depth ceiling.
pub fn compare(left: &Value, right: &Value) -> CompareResult<()> {
    let config = CompareConfig::default().with_ignored_keys(ignored_keys());
    compare_with(&config, left, right)
}
