//! Value model for datacmp.
//!
//! This crate provides the runtime values the comparator walks. Every other
//! datacmp crate depends on `datacmp-value`.
//!
//! # Key Types
//!
//! - [`Value`] -- Closed sum type over scalars, handles, collections, and objects
//! - [`Key`] -- Integer or string key of a [`Collection`], with a cross-type total order
//! - [`ObjectRef`] -- Shared composite object with an [`Identity`] and named fields
//! - [`Handle`] -- Opaque resource or callable, compared by identity only
//! - [`TypeTag`] -- Canonical type of a value; objects carry their class name

pub mod identity;
pub mod key;
pub mod object;
pub mod value;

pub use identity::{Handle, Identity};
pub use key::Key;
pub use object::{FieldName, Object, ObjectRef, Visibility};
pub use value::{Collection, TypeTag, Value};
