//! Entries that delegate production to a provider method.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RiggingError};
use crate::registry::Registry;
use crate::value::Value;

/// Produces its value by calling a named method on another resolved entry.
///
/// The provider identifier must resolve, at call time, to an object exposing
/// the provider capability; anything else fails with
/// [`RiggingError::InvalidProviderResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMethodEntry {
    provider: String,
    method: String,
}

impl ProviderMethodEntry {
    pub fn new(provider: impl Into<String>, method: impl Into<String>) -> Self {
        ProviderMethodEntry {
            provider: provider.into(),
            method: method.into(),
        }
    }

    /// Identifier of the provider entry.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Method dispatched on the provider.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub(crate) fn produce(&self, registry: &Registry) -> Result<Value> {
        let resolved = registry.get(&self.provider)?;
        let object = match &resolved {
            Value::Object(object) => Rc::clone(object),
            _ => return Err(self.invalid_result()),
        };
        let provider = object.as_provider().ok_or_else(|| self.invalid_result())?;
        provider.call_method(&self.method, registry)
    }

    fn invalid_result(&self) -> RiggingError {
        RiggingError::InvalidProviderResult {
            provider: self.provider.clone(),
            method: self.method.clone(),
        }
    }

    pub(crate) fn cache_parameters(&self) -> Option<serde_json::Value> {
        serde_json::to_value(self).ok()
    }

    pub(crate) fn from_cache_parameters(params: &serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(params.clone())?)
    }
}
