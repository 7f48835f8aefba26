//! Store-and-return entries.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RiggingError};
use crate::registry::Registry;
use crate::value::Value;

/// A deferred production closure, invoked with the delegate registry.
pub type Producer = Rc<dyn Fn(&Registry) -> Result<Value>>;

/// A standard entry holding a value or the means to compute it once.
///
/// Three forms:
///
/// - `Literal` — the stored value is returned as-is
/// - `Producer` — a zero-state closure computes the value; the registry's
///   value cache guarantees it runs at most once per entry instance
/// - `Initializer` — names an initializer in the producing registry's
///   catalog; the snapshot-able stand-in for a deferred closure
pub enum ValueEntry {
    Literal(Value),
    Producer(Producer),
    Initializer(String),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum CacheParameters {
    Literal(serde_json::Value),
    Initializer(String),
}

impl ValueEntry {
    /// Entry returning the stored value unchanged.
    pub fn literal(value: impl Into<Value>) -> Self {
        ValueEntry::Literal(value.into())
    }

    /// Entry computing its value on first request.
    pub fn deferred<F>(producer: F) -> Self
    where
        F: Fn(&Registry) -> Result<Value> + 'static,
    {
        ValueEntry::Producer(Rc::new(producer))
    }

    /// Entry invoking the named catalog initializer on first request.
    pub fn initializer(name: impl Into<String>) -> Self {
        ValueEntry::Initializer(name.into())
    }

    pub(crate) fn produce(&self, registry: &Registry) -> Result<Value> {
        match self {
            ValueEntry::Literal(value) => Ok(value.clone()),
            ValueEntry::Producer(producer) => producer(registry),
            ValueEntry::Initializer(name) => {
                let initializer =
                    registry
                        .initializer(name)
                        .ok_or_else(|| RiggingError::UnknownType {
                            name: name.clone(),
                        })?;
                initializer(registry)
            }
        }
    }

    pub(crate) fn cache_parameters(&self) -> Option<serde_json::Value> {
        let parameters = match self {
            ValueEntry::Literal(value) => CacheParameters::Literal(value.to_plain()?),
            ValueEntry::Producer(_) => return None,
            ValueEntry::Initializer(name) => CacheParameters::Initializer(name.clone()),
        };
        serde_json::to_value(parameters).ok()
    }

    pub(crate) fn from_cache_parameters(params: &serde_json::Value) -> Result<Self> {
        let parameters: CacheParameters = serde_json::from_value(params.clone())?;
        Ok(match parameters {
            CacheParameters::Literal(plain) => ValueEntry::Literal(Value::from_plain(&plain)),
            CacheParameters::Initializer(name) => ValueEntry::Initializer(name),
        })
    }
}
