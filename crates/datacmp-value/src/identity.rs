use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(1);

/// Unique identity assigned to an object or handle when it is allocated.
///
/// Identities are drawn from a process-wide counter, so two live values
/// never share one. An `Identity` is only a lookup key; it carries no
/// ownership of the value it names.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity(u64);

impl Identity {
    /// Allocate a fresh identity.
    pub fn next() -> Self {
        Self(NEXT_IDENTITY.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity(#{})", self.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque external handle: an open resource or a callable.
///
/// Two handles are equal only when they share an identity. Cloning a handle
/// produces another reference to the same resource, not a new one. The
/// label exists for diagnostics and plays no part in equality.
#[derive(Clone)]
pub struct Handle {
    id: Identity,
    label: String,
}

impl Handle {
    /// Create a handle with a fresh identity.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Identity::next(),
            label: label.into(),
        }
    }

    /// The handle's identity.
    pub fn id(&self) -> Identity {
        self.id
    }

    /// The diagnostic label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Handle {}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({} {})", self.id, self.label)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identities_are_unique() {
        let a = Identity::next();
        let b = Identity::next();
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn display_is_hash_prefixed() {
        let id = Identity::next();
        assert_eq!(format!("{id}"), format!("#{}", id.as_u64()));
    }

    #[test]
    fn cloned_handle_keeps_identity() {
        let h = Handle::new("tmpfile");
        let copy = h.clone();
        assert_eq!(h, copy);
        assert_eq!(copy.label(), "tmpfile");
    }

    #[test]
    fn same_label_different_handles_differ() {
        let a = Handle::new("tmpfile");
        let b = Handle::new("tmpfile");
        assert_ne!(a, b);
    }

    #[test]
    fn serde_roundtrip() {
        let id = Identity::next();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
