//! Values held and produced by a registry.
//!
//! [`Value`] is a closed enum over everything an entry can produce: plain
//! data (null, booleans, numbers, strings, sequences, maps), nested registry
//! handles, and opaque objects with declared capabilities (see [`object`]).
//!
//! The plain subset converts losslessly to and from [`serde_json::Value`],
//! which is what the snapshot format stores.

pub mod object;
pub mod path;

pub use object::{Accessor, Indexable, ObjectValue, Record};

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::registry::Registry;

/// A value held by a registry entry or produced during resolution.
///
/// Equality is structural for plain data and pointer identity for
/// [`Value::Registry`] and [`Value::Object`] handles.
#[derive(Clone)]
pub enum Value {
    /// Absent value. Distinct from a missing key: a key mapped to `Null`
    /// still counts as present during path traversal.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// A nested registry, traversable by path through its own entries.
    Registry(Rc<Registry>),
    /// An opaque object exposing declared traversal and call capabilities.
    Object(Rc<dyn ObjectValue>),
}

impl Value {
    /// Wrap an object value.
    pub fn object(object: Rc<impl ObjectValue + 'static>) -> Self {
        Value::Object(object)
    }

    /// Wrap a nested registry handle.
    pub fn registry(registry: Rc<Registry>) -> Self {
        Value::Registry(registry)
    }

    /// True if the value is composed only of nulls, booleans, numbers,
    /// strings, and sequences/maps thereof.
    pub fn is_plain(&self) -> bool {
        match self {
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Str(_) => true,
            Value::Float(float) => float.is_finite(),
            Value::Seq(items) => items.iter().all(Value::is_plain),
            Value::Map(map) => map.values().all(Value::is_plain),
            Value::Registry(_) | Value::Object(_) => false,
        }
    }

    /// Convert the plain subset into a JSON value.
    ///
    /// Returns `None` for registry handles, objects, and non-finite floats.
    pub fn to_plain(&self) -> Option<serde_json::Value> {
        match self {
            Value::Null => Some(serde_json::Value::Null),
            Value::Bool(flag) => Some(serde_json::Value::Bool(*flag)),
            Value::Int(int) => Some(serde_json::Value::Number((*int).into())),
            Value::Float(float) => serde_json::Number::from_f64(*float).map(serde_json::Value::Number),
            Value::Str(text) => Some(serde_json::Value::String(text.clone())),
            Value::Seq(items) => items
                .iter()
                .map(Value::to_plain)
                .collect::<Option<Vec<_>>>()
                .map(serde_json::Value::Array),
            Value::Map(map) => map
                .iter()
                .map(|(key, value)| value.to_plain().map(|plain| (key.clone(), plain)))
                .collect::<Option<serde_json::Map<_, _>>>()
                .map(serde_json::Value::Object),
            Value::Registry(_) | Value::Object(_) => None,
        }
    }

    /// Build a value from a JSON value. Always yields plain data.
    pub fn from_plain(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(flag) => Value::Bool(*flag),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(int) => Value::Int(int),
                None => Value::Float(number.as_f64().unwrap_or(f64::MAX)),
            },
            serde_json::Value::String(text) => Value::Str(text.clone()),
            serde_json::Value::Array(items) => {
                Value::Seq(items.iter().map(Value::from_plain).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.iter()
                    .map(|(key, value)| (key.clone(), Value::from_plain(value)))
                    .collect(),
            ),
        }
    }

    /// Short label describing the value's shape, used in traversal errors.
    pub fn type_label(&self) -> String {
        match self {
            Value::Null => "null".into(),
            Value::Bool(_) => "boolean".into(),
            Value::Int(_) | Value::Float(_) => "number".into(),
            Value::Str(_) => "string".into(),
            Value::Seq(_) => "sequence".into(),
            Value::Map(_) => "map".into(),
            Value::Registry(_) => "registry".into(),
            Value::Object(object) => format!("object '{}'", object.type_name()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(int) => Some(*int),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Rc<dyn ObjectValue>> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_registry(&self) -> Option<&Rc<Registry>> {
        match self {
            Value::Registry(registry) => Some(registry),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Registry(a), Value::Registry(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(flag) => write!(f, "Bool({flag})"),
            Value::Int(int) => write!(f, "Int({int})"),
            Value::Float(float) => write!(f, "Float({float})"),
            Value::Str(text) => write!(f, "Str({text:?})"),
            Value::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Value::Registry(_) => write!(f, "Registry(..)"),
            Value::Object(object) => write!(f, "Object({})", object.type_name()),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(int: i64) -> Self {
        Value::Int(int)
    }
}

impl From<i32> for Value {
    fn from(int: i32) -> Self {
        Value::Int(int.into())
    }
}

impl From<f64> for Value {
    fn from(float: f64) -> Self {
        Value::Float(float)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Str(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Str(text)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<Rc<Registry>> for Value {
    fn from(registry: Rc<Registry>) -> Self {
        Value::Registry(registry)
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().collect())
    }
}
