//! Composite objects: values with identity, a class, and named fields.
//!
//! Objects are shared through [`ObjectRef`] so that graphs with self- and
//! cross-references can be built after construction. Field names carry the
//! visibility they were declared with; comparison only ever sees the bare
//! name (see [`Object::field_map`]).

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::identity::Identity;
use crate::value::Value;

/// Visibility a field was declared with.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    /// Private to the class that declared it.
    Private { declared_in: String },
}

/// A visibility-qualified field name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldName {
    visibility: Visibility,
    name: String,
}

impl FieldName {
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            visibility: Visibility::Public,
            name: name.into(),
        }
    }

    pub fn protected(name: impl Into<String>) -> Self {
        Self {
            visibility: Visibility::Protected,
            name: name.into(),
        }
    }

    pub fn private(declared_in: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            visibility: Visibility::Private {
                declared_in: declared_in.into(),
            },
            name: name.into(),
        }
    }

    /// The name with its visibility qualifier stripped.
    pub fn bare(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }
}

/// The state of a composite object.
#[derive(Debug)]
pub struct Object {
    class: String,
    fields: Vec<(FieldName, Value)>,
}

impl Object {
    /// The concrete class name; part of the object's type tag.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Fields in declaration order, with their qualified names.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldName, &Value)> {
        self.fields.iter().map(|(name, value)| (name, value))
    }

    /// Flatten to a map keyed by bare field name.
    ///
    /// Public and non-public fields are merged. When two fields share a bare
    /// name, the later one's value wins and the earlier one's position is
    /// kept.
    pub fn field_map(&self) -> IndexMap<&str, &Value> {
        let mut map = IndexMap::with_capacity(self.fields.len());
        for (name, value) in &self.fields {
            map.insert(name.bare(), value);
        }
        map
    }

    /// Look up a field by bare name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .rev()
            .find(|(field, _)| field.bare() == name)
            .map(|(_, value)| value)
    }

    fn set(&mut self, field: FieldName, value: Value) {
        match self.fields.iter_mut().find(|(existing, _)| *existing == field) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field, value)),
        }
    }
}

/// Shared handle to a composite [`Object`].
///
/// Cloning an `ObjectRef` yields another reference to the same object with
/// the same [`Identity`]. Use [`ObjectRef::duplicate`] for a distinct
/// instance with the same field values.
#[derive(Clone)]
pub struct ObjectRef {
    id: Identity,
    inner: Rc<RefCell<Object>>,
}

impl ObjectRef {
    /// Allocate an empty object of the given class.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            id: Identity::next(),
            inner: Rc::new(RefCell::new(Object {
                class: class.into(),
                fields: Vec::new(),
            })),
        }
    }

    /// Builder form of [`ObjectRef::set`].
    pub fn with_field(self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Builder form of [`ObjectRef::set_field`] for a field private to this
    /// object's class.
    pub fn with_private(self, name: &str, value: impl Into<Value>) -> Self {
        let class = self.class();
        self.set_field(FieldName::private(class, name), value);
        self
    }

    /// Set a public field, replacing any existing public field of that name.
    ///
    /// Panics if the object is currently borrowed, e.g. mid-comparison.
    pub fn set(&self, name: &str, value: impl Into<Value>) {
        self.set_field(FieldName::public(name), value);
    }

    /// Set a field with an explicit visibility.
    pub fn set_field(&self, field: FieldName, value: impl Into<Value>) {
        self.inner.borrow_mut().set(field, value.into());
    }

    /// Clone of the field value with the given bare name.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.inner.borrow().get(name).cloned()
    }

    pub fn identity(&self) -> Identity {
        self.id
    }

    pub fn class(&self) -> String {
        self.inner.borrow().class.clone()
    }

    /// Borrow the object's state.
    pub fn borrow(&self) -> Ref<'_, Object> {
        self.inner.borrow()
    }

    /// Returns `true` if both handles refer to the same object.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// A new object with a fresh identity and the same class and fields.
    ///
    /// The copy is shallow: nested objects are shared, not duplicated.
    pub fn duplicate(&self) -> ObjectRef {
        let state = self.inner.borrow();
        Self {
            id: Identity::next(),
            inner: Rc::new(RefCell::new(Object {
                class: state.class.clone(),
                fields: state.fields.clone(),
            })),
        }
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(state) => write!(f, "ObjectRef({}{})", state.class, self.id),
            Err(_) => write!(f, "ObjectRef({})", self.id),
        }
    }
}
