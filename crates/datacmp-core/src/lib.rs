//! Deep structural comparison for datacmp.
//!
//! Walks two [`Value`](datacmp_value::Value) trees side by side and stops at
//! the first discrepancy, reporting where it was found. Self- and
//! cross-referencing object graphs are detected and resolved instead of
//! recursing forever.
//!
//! # Key Types
//!
//! - [`Comparator`] -- Comparison bound to an explicit [`CompareConfig`]
//! - [`CompareConfig`] / [`IgnoredKeys`] -- Keys skipped at any depth, depth ceiling
//! - [`CompareError`] / [`ErrorKind`] -- The first discrepancy and its family
//! - [`Path`] -- Location of a discrepancy relative to the roots
//!
//! The free functions [`compare`], [`ignore_key`] and [`unignore_key`] work
//! against a process-wide ignored-key set; prefer [`Comparator`] or
//! [`compare_with`] where the configuration can be passed explicitly.

pub mod comparator;
pub mod config;
pub mod error;
pub mod path;
pub mod registry;

pub use comparator::{compare_with, Comparator};
pub use config::{CompareConfig, IgnoredKeys, DEFAULT_MAX_DEPTH};
pub use error::{CompareError, CompareResult, ErrorKind, Side};
pub use path::Path;
pub use registry::{clear_ignored_keys, compare, ignore_key, ignored_keys, unignore_key};
