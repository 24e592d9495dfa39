//! Error types for the comparator.
//!
//! Every error is terminal: comparison stops at the first discrepancy and
//! the error describes it. Messages never render nested object contents, so
//! formatting an error cannot loop on cyclic values.

use std::fmt;

use datacmp_value::{Key, TypeTag};

use crate::path::Path;

/// Which of the two compared roots an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("Left"),
            Side::Right => f.write_str("Right"),
        }
    }
}

/// Coarse family of a [`CompareError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The values are different: types, key sets, or scalar values.
    ValuesDiffer,
    /// An object refers to itself one step away; comparison cannot continue.
    CircularReference,
    /// The configured depth ceiling was reached.
    DepthExceeded,
}

/// The first discrepancy found while comparing two values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    /// The canonical type tags differ.
    #[error("Value types differ{}, left one is: {left}, right one is: {right}.", .path.location())]
    TypeMismatch {
        left: TypeTag,
        right: TypeTag,
        path: Path,
    },

    /// The sorted, non-ignored key sets of two collections or objects differ.
    #[error(
        "Array keys / object properties differ{}, left ones are: {}, right ones are: {}.",
        .path.location(),
        describe_keys(.left),
        describe_keys(.right)
    )]
    KeySetMismatch {
        left: Vec<Key>,
        right: Vec<Key>,
        path: Path,
    },

    /// Same type, but the scalar values or handle identities differ.
    #[error("Values differ{}, left one is: {left}, right one is: {right}.", .path.location())]
    ValueMismatch {
        /// Formatted left value.
        left: String,
        /// Formatted right value.
        right: String,
        path: Path,
    },

    /// An object would be compared against itself at the very next level.
    #[error(
        "{side} object at \"{path}\" references itself{}, comparing cannot continue to avoid infinite recursion.",
        .first_seen.location_or_root()
    )]
    CircularSelfReference {
        side: Side,
        /// Where the object was entered on the current branch.
        first_seen: Path,
        /// Where the object was reached again.
        path: Path,
    },

    /// Descending further would exceed the configured maximum depth.
    #[error("Maximum comparison depth of {limit} exceeded{}.", .path.location())]
    DepthExceeded { limit: usize, path: Path },
}

impl CompareError {
    /// Where the discrepancy was found.
    pub fn path(&self) -> &Path {
        match self {
            CompareError::TypeMismatch { path, .. }
            | CompareError::KeySetMismatch { path, .. }
            | CompareError::ValueMismatch { path, .. }
            | CompareError::CircularSelfReference { path, .. }
            | CompareError::DepthExceeded { path, .. } => path,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CompareError::TypeMismatch { .. }
            | CompareError::KeySetMismatch { .. }
            | CompareError::ValueMismatch { .. } => ErrorKind::ValuesDiffer,
            CompareError::CircularSelfReference { .. } => ErrorKind::CircularReference,
            CompareError::DepthExceeded { .. } => ErrorKind::DepthExceeded,
        }
    }
}

/// Render a sorted key set the way collections are described.
fn describe_keys(keys: &[Key]) -> String {
    let json = serde_json::to_string(keys).unwrap_or_else(|_| format!("{keys:?}"));
    format!("(collection) {json}")
}

/// Convenience alias for comparison results.
pub type CompareResult<T> = Result<T, CompareError>;
