use std::fmt;

use indexmap::IndexMap;

use crate::identity::{Handle, Identity};
use crate::key::Key;
use crate::object::ObjectRef;

/// Insertion-ordered keyed collection. Order matters for iteration only.
pub type Collection = IndexMap<Key, Value>;

/// A comparable runtime value.
///
/// Cycles can only pass through [`Value::Object`]; collections are held by
/// value.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Opaque external resource, compared by identity.
    Resource(Handle),
    /// Opaque callable, compared by identity.
    Function(Handle),
    Collection(Collection),
    Object(ObjectRef),
}

/// Canonical type of a [`Value`].
///
/// Integers and floats are distinct types. Objects are tagged with their
/// concrete class, so two objects of different classes never share a tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Null,
    Bool,
    Int,
    Float,
    String,
    Resource,
    Function,
    Collection,
    Object(String),
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Null => f.write_str("null"),
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::Int => f.write_str("int"),
            TypeTag::Float => f.write_str("float"),
            TypeTag::String => f.write_str("string"),
            TypeTag::Resource => f.write_str("resource"),
            TypeTag::Function => f.write_str("function"),
            TypeTag::Collection => f.write_str("collection"),
            TypeTag::Object(class) => f.write_str(class),
        }
    }
}

impl Value {
    /// Build a collection from key/value pairs, keeping their order.
    pub fn collection<K, V, I>(entries: I) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Collection(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a collection keyed `0..n`.
    pub fn list<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Value::Collection(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (Key::Int(i as i64), v.into()))
                .collect(),
        )
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Bool,
            Value::Int(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::String(_) => TypeTag::String,
            Value::Resource(_) => TypeTag::Resource,
            Value::Function(_) => TypeTag::Function,
            Value::Collection(_) => TypeTag::Collection,
            Value::Object(obj) => TypeTag::Object(obj.class()),
        }
    }

    /// Returns `true` for primitives and opaque handles.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Collection(_) | Value::Object(_))
    }

    /// Identity of objects and handles; `None` for everything else.
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Value::Resource(h) | Value::Function(h) => Some(h.id()),
            Value::Object(obj) => Some(obj.identity()),
            _ => None,
        }
    }

    /// One-line, non-recursive rendering for diagnostics.
    ///
    /// Objects render as their class and identity only, so describing a
    /// cyclic value always terminates.
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "(null) null".to_string(),
            Value::Bool(b) => format!("(bool) {b}"),
            Value::Int(i) => format!("(int) {i}"),
            Value::Float(x) => format!("(float) {x:?}"),
            Value::String(s) => {
                let quoted = serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}"));
                format!("(string) {quoted}")
            }
            Value::Resource(h) => format!("(resource) {h}"),
            Value::Function(h) => format!("(function) {h}"),
            Value::Collection(c) => format!("(collection) [{} entries]", c.len()),
            Value::Object(obj) => format!("(object) {}{}", obj.class(), obj.identity()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl From<Collection> for Value {
    fn from(c: Collection) -> Self {
        Value::Collection(c)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::list(items),
            serde_json::Value::Object(map) => Value::collection(map),
        }
    }
}
