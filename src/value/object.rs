//! Object values and their declared capabilities.
//!
//! The registry never inspects object internals. Instead, an object declares
//! what it supports through [`ObjectValue`]: a type name (used as its default
//! registration identifier and injection capability), optional key-based
//! traversal capabilities, an optional provider capability, and an `invoke`
//! hook for post-construction calls.
//!
//! Traversal capabilities are consulted in a fixed order by the path
//! resolver; see [`crate::value::path`].

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::{Result, RiggingError};
use crate::provider::Provider;
use crate::value::Value;

/// Offset-style access: an object that can be indexed by string keys.
pub trait Indexable {
    /// Exact existence test for the key. A key holding `Null` is present.
    fn offset_exists(&self, key: &str) -> bool;

    /// Read the value stored at the key.
    fn offset_get(&self, key: &str) -> Result<Value>;
}

/// Property-style access through declared presence/read accessors.
pub trait Accessor {
    /// Tells whether the named property can be read.
    fn has(&self, key: &str) -> bool;

    /// Read the named property.
    fn get(&self, key: &str) -> Result<Value>;
}

/// Capability surface for opaque object values.
///
/// Every method except [`type_name`](ObjectValue::type_name) has a default:
/// an object starts with no capabilities and opts into the ones it supports.
pub trait ObjectValue {
    /// The object's type label. Doubles as its default registration
    /// identifier and its default injection capability.
    fn type_name(&self) -> &str;

    /// Offset-style key access, if supported.
    fn as_indexable(&self) -> Option<&dyn Indexable> {
        None
    }

    /// Property accessor support, if any.
    fn as_accessor(&self) -> Option<&dyn Accessor> {
        None
    }

    /// Read a public field by name. `Some(Value::Null)` means the field
    /// exists and holds null; `None` means there is no such field.
    fn public_field(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Provider capability, if the object's methods can be registered as
    /// entries (see [`crate::provider`]).
    fn as_provider(&self) -> Option<&dyn Provider> {
        None
    }

    /// Tells whether the object satisfies an injection capability.
    ///
    /// Defaults to matching the object's own type name; objects standing in
    /// for an interface override this to claim additional capabilities.
    fn implements(&self, capability: &str) -> bool {
        capability == self.type_name()
    }

    /// Apply a named post-construction call with resolved arguments.
    fn invoke(&self, method: &str, _arguments: Vec<Value>) -> Result<()> {
        Err(RiggingError::UnsupportedCall {
            class: self.type_name().to_string(),
            method: method.to_string(),
        })
    }
}

/// A dynamic record object backed by named fields.
///
/// `Record` is the stock constructed-instance type: blueprints that do not
/// define their own object type can construct one, post-construction calls
/// store their arguments under the method name, and every field is readable
/// through [`ObjectValue::public_field`] (and therefore by dotted paths).
pub struct Record {
    name: String,
    capabilities: Vec<String>,
    fields: RefCell<BTreeMap<String, Value>>,
}

impl Record {
    /// Create an empty record with the given type name.
    pub fn new(name: impl Into<String>) -> Self {
        Record {
            name: name.into(),
            capabilities: Vec::new(),
            fields: RefCell::new(BTreeMap::new()),
        }
    }

    /// Declare an additional injection capability the record satisfies.
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(capability.into());
        self
    }

    /// Set a field while building the record.
    pub fn with_field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.borrow_mut().insert(name.into(), value.into());
        self
    }

    /// Set a field on a shared record.
    pub fn set_field(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.borrow_mut().insert(name.into(), value.into());
    }

    /// Read a field.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name).cloned()
    }
}

impl ObjectValue for Record {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn public_field(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name).cloned()
    }

    fn implements(&self, capability: &str) -> bool {
        capability == self.name || self.capabilities.iter().any(|c| c == capability)
    }

    fn invoke(&self, method: &str, arguments: Vec<Value>) -> Result<()> {
        let value = match arguments.len() {
            0 => Value::Null,
            1 => arguments.into_iter().next().unwrap_or(Value::Null),
            _ => Value::Seq(arguments),
        };
        self.fields.borrow_mut().insert(method.to_string(), value);
        Ok(())
    }
}
