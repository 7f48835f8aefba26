//! Provider objects: batches of entries keyed by declared return type.
//!
//! A provider is an object whose externally-callable methods each produce one
//! value. Instead of runtime reflection, a provider declares its method table
//! explicitly through [`Provider::provided_methods`]: each method carries its
//! name and, optionally, the concrete type name it returns. The builder
//! registers one provider-method entry per method *with* a declared return
//! type, keyed by that type name; methods without one are skipped.

use crate::error::Result;
use crate::registry::Registry;
use crate::value::Value;

/// A declared provider method: its callable name and optional return type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvidedMethod {
    /// Name dispatched through [`Provider::call_method`].
    pub name: String,
    /// Declared concrete return type, used as the registration identifier.
    /// `None` means the method is not registrable.
    pub return_type: Option<String>,
}

impl ProvidedMethod {
    /// A method with a declared concrete return type.
    pub fn returning(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        ProvidedMethod {
            name: name.into(),
            return_type: Some(return_type.into()),
        }
    }

    /// A method without a declared return type; never registered.
    pub fn untyped(name: impl Into<String>) -> Self {
        ProvidedMethod {
            name: name.into(),
            return_type: None,
        }
    }
}

/// Capability of objects whose methods can be registered as entries.
///
/// Implementors also implement [`ObjectValue`](crate::value::ObjectValue)
/// and must return themselves from
/// [`ObjectValue::as_provider`](crate::value::ObjectValue::as_provider) so
/// provider-method entries can reach this capability at production time.
pub trait Provider {
    /// The declared method table.
    fn provided_methods(&self) -> Vec<ProvidedMethod>;

    /// Dispatch a declared method. The registry is the delegate view used
    /// for resolving whatever dependencies the method needs.
    fn call_method(&self, method: &str, registry: &Registry) -> Result<Value>;
}
